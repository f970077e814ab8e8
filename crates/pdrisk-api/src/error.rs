//! Error types for the API access layer.

use thiserror::Error;

/// Errors that can occur while talking to the backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The transport itself failed (connection, DNS, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status and a message.
    #[error("server rejected request ({status}): {message}")]
    ServerRejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response's `detail` or `error` field.
        message: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Another request is already in flight on this gateway.
    #[error("another request is already in flight")]
    Busy,

    /// A local file could not be read for upload.
    #[error("file read error: {0}")]
    FileRead(String),

    /// The upload payload could not be encoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// Returns a user-friendly message suitable for direct display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => {
                "Could not reach the prediction service. Please check your connection.".to_string()
            }
            Self::ServerRejected { message, .. } => message.clone(),
            Self::MalformedResponse(_) => {
                "The service returned an unexpected response.".to_string()
            }
            Self::Busy => "Another request is still running. Please wait for it.".to_string(),
            Self::FileRead(_) => "Could not read the selected file. Please try again.".to_string(),
            Self::InvalidPayload(_) => "The selected file could not be uploaded.".to_string(),
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Busy)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::FileRead(err.to_string())
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
