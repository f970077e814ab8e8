//! Uniform request handling against the two backends.
//!
//! One gateway owns the transport client, the endpoint configuration, and
//! the session handle. Every request goes through [`RequestGateway::send`],
//! which injects the bearer token, encodes JSON or multipart bodies, and
//! normalizes the outcome into one error taxonomy.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::{ApiConfig, Backend};
use crate::error::{ApiError, Result};
use crate::session::Session;
use crate::upload::FilePayload;

/// One request, consumed by [`RequestGateway::send`].
#[derive(Debug)]
pub struct RequestDescriptor {
    /// Target backend.
    pub backend: Backend,
    /// HTTP method.
    pub method: Method,
    /// Path appended to the backend's base URL, including any query string.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Optional file payload. When present the request is encoded as
    /// multipart and `body` is ignored.
    pub file: Option<FilePayload>,
    /// Extra headers beyond authorization and content type.
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// GET request against a backend path.
    #[must_use]
    pub fn get(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::GET, path)
    }

    /// POST request against a backend path.
    #[must_use]
    pub fn post(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::POST, path)
    }

    fn new(backend: Backend, method: Method, path: impl Into<String>) -> Self {
        Self {
            backend,
            method,
            path: path.into(),
            body: None,
            file: None,
            headers: Vec::new(),
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a file payload, switching the request to multipart.
    #[must_use]
    pub fn with_file(mut self, file: FilePayload) -> Self {
        self.file = Some(file);
        self
    }

    /// Attach an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Gateway for a single backend pair.
#[derive(Debug)]
pub struct RequestGateway {
    client: Client,
    config: ApiConfig,
    session: Session,
    in_flight: AtomicBool,
}

impl RequestGateway {
    /// Create a gateway with the transport timeout from the config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Transport(format!("failed to create HTTP client: {err}")))?;

        Ok(Self {
            client,
            config,
            session,
            in_flight: AtomicBool::new(false),
        })
    }

    /// The session handle this gateway reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The endpoint configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send one request and normalize the result.
    ///
    /// Uploads never set an explicit multipart content-type header; the
    /// transport generates it together with the boundary.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Busy`] when another request is already in flight.
    /// - [`ApiError::Transport`] when the transport fails.
    /// - [`ApiError::MalformedResponse`] when the body is not JSON.
    /// - [`ApiError::ServerRejected`] for non-success statuses, carrying
    ///   the server's `detail` or `error` message.
    pub fn send(&self, descriptor: RequestDescriptor) -> Result<Value> {
        let _slot = InFlightSlot::acquire(&self.in_flight)?;

        let url = format!(
            "{}{}",
            self.config.base_url(descriptor.backend),
            descriptor.path
        );
        debug!(method = %descriptor.method, %url, multipart = descriptor.file.is_some(), "sending request");

        let mut request = self.client.request(descriptor.method, &url);

        if let Some(token) = self.session.get() {
            request = request.bearer_auth(token);
        }
        for (name, value) in &descriptor.headers {
            request = request.header(name, value);
        }

        request = if let Some(file) = descriptor.file {
            request.multipart(file.into_form(&self.client)?)
        } else if let Some(body) = descriptor.body {
            request.json(&body)
        } else {
            request
        };

        let response = request
            .send()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        normalize(response)
    }
}

/// Parse the body as JSON first, then apply the status check, matching the
/// order in which callers see failures: an unparseable body is malformed
/// regardless of status.
fn normalize(response: reqwest::blocking::Response) -> Result<Value> {
    let status = response.status();
    let text = response
        .text()
        .map_err(|err| ApiError::Transport(err.to_string()))?;

    let value: Value = serde_json::from_str(&text)
        .map_err(|err| ApiError::MalformedResponse(err.to_string()))?;

    if status.is_success() {
        Ok(value)
    } else {
        let message = value
            .get("detail")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str))
            .unwrap_or("Request failed")
            .to_string();
        Err(ApiError::ServerRejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// RAII holder of the gateway's single request slot.
struct InFlightSlot<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightSlot<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ApiError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builders() {
        let descriptor = RequestDescriptor::post(Backend::Auth, "/api/v1/django/auth/login/")
            .with_body(serde_json::json!({"email": "a@b.c"}))
            .with_header("X-Request-Id", "42");
        assert_eq!(descriptor.method, Method::POST);
        assert!(descriptor.body.is_some());
        assert!(descriptor.file.is_none());
        assert_eq!(descriptor.headers.len(), 1);
    }

    #[test]
    fn test_gateway_creation() {
        let gateway = RequestGateway::new(ApiConfig::default(), Session::new());
        assert!(gateway.is_ok());
    }

    #[test]
    fn test_in_flight_slot_is_exclusive() {
        let flag = AtomicBool::new(false);
        let slot = InFlightSlot::acquire(&flag).expect("first acquire");
        assert!(matches!(InFlightSlot::acquire(&flag), Err(ApiError::Busy)));
        drop(slot);
        assert!(InFlightSlot::acquire(&flag).is_ok());
    }
}
