//! File payloads for multipart uploads.
//!
//! A user-selected file is either a byte-addressable local path or a
//! remote/virtual reference (a URL) that has to be dereferenced into bytes
//! first. The gateway depends only on [`FilePayload`]; the sourcing
//! difference stays inside this module.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

/// Default file name when the source does not carry one.
const DEFAULT_FILE_NAME: &str = "upload.csv";

/// Default MIME type for uploads.
const DEFAULT_MIME_TYPE: &str = "text/csv";

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A local path whose bytes are read directly.
    LocalHandle(PathBuf),
    /// A remote or virtual reference that is dereferenced over HTTP.
    RemoteReference(String),
}

impl FileSource {
    /// Read the source into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileRead`] when a local path cannot be read and
    /// [`ApiError::Transport`] when a remote reference cannot be fetched.
    pub fn read_bytes(&self, client: &Client) -> Result<Vec<u8>> {
        match self {
            Self::LocalHandle(path) => {
                fs::read(path).map_err(|err| ApiError::FileRead(err.to_string()))
            }
            Self::RemoteReference(url) => {
                debug!(%url, "dereferencing remote file reference");
                let response = client.get(url).send()?;
                if !response.status().is_success() {
                    return Err(ApiError::Transport(format!(
                        "reference fetch failed with status {}",
                        response.status()
                    )));
                }
                Ok(response.bytes()?.to_vec())
            }
        }
    }
}

/// One user-selected file, ready for multipart encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Byte source.
    pub source: FileSource,
    /// File name sent to the server.
    pub name: String,
    /// MIME type sent to the server.
    pub mime_type: String,
}

impl FilePayload {
    /// Payload backed by a local path. The file name defaults to the
    /// path's final component.
    #[must_use]
    pub fn local(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| DEFAULT_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            source: FileSource::LocalHandle(path.to_path_buf()),
            name,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }

    /// Payload backed by a remote reference.
    #[must_use]
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            source: FileSource::RemoteReference(url.into()),
            name: DEFAULT_FILE_NAME.to_string(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }

    /// Override the file name sent to the server.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the MIME type sent to the server.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Encode this payload as a single-field multipart form.
    ///
    /// A remote reference that cannot be dereferenced falls back to
    /// attaching the reference string itself; a local read failure is a
    /// hard error surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileRead`] for unreadable local paths and
    /// [`ApiError::InvalidPayload`] for an unparseable MIME type.
    pub fn into_form(self, client: &Client) -> Result<Form> {
        let bytes = match self.source.read_bytes(client) {
            Ok(bytes) => bytes,
            Err(error) => match &self.source {
                FileSource::RemoteReference(url) => {
                    warn!(%error, "could not dereference file reference; attaching it directly");
                    url.clone().into_bytes()
                }
                FileSource::LocalHandle(_) => return Err(error),
            },
        };

        let part = Part::bytes(bytes)
            .file_name(self.name)
            .mime_str(&self.mime_type)
            .map_err(|err| ApiError::InvalidPayload(err.to_string()))?;

        Ok(Form::new().part("file", part))
    }
}
