//! Named operations against the auth backend.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::Backend;
use crate::error::Result;
use crate::gateway::{RequestDescriptor, RequestGateway};

/// Path prefix of the auth backend's endpoints.
const AUTH_PREFIX: &str = "/api/v1/django/auth";

/// Client for signup, login, logout, and profile.
#[derive(Debug, Clone)]
pub struct AuthClient {
    gateway: Arc<RequestGateway>,
}

impl AuthClient {
    /// Create a client over a shared gateway.
    #[must_use]
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Register a new user. On success the access token from
    /// `tokens.access` is stored in the session.
    ///
    /// The backend expects the password twice; the confirmation is filled
    /// in here so callers only pass it once.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<Value> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirm": password,
        });
        let response = self.gateway.send(
            RequestDescriptor::post(Backend::Auth, format!("{AUTH_PREFIX}/signup/"))
                .with_body(body),
        )?;
        self.store_access_token(&response);
        Ok(response)
    }

    /// Log in. On success the access token from `tokens.access` is stored
    /// in the session.
    pub fn login(&self, email: &str, password: &str) -> Result<Value> {
        let body = json!({"email": email, "password": password});
        let response = self.gateway.send(
            RequestDescriptor::post(Backend::Auth, format!("{AUTH_PREFIX}/login/")).with_body(body),
        )?;
        self.store_access_token(&response);
        Ok(response)
    }

    /// Log out. The backend call may fail (expired token, unreachable
    /// server); that failure is swallowed because logout must always be
    /// locally effective. The session is cleared unconditionally.
    pub fn logout(&self) {
        match self
            .gateway
            .send(RequestDescriptor::post(Backend::Auth, format!("{AUTH_PREFIX}/logout/")))
        {
            Ok(_) => debug!("logout acknowledged by server"),
            Err(error) => warn!(%error, "logout request failed; clearing session anyway"),
        }
        self.gateway.session().clear();
    }

    /// Fetch the current user's profile.
    pub fn profile(&self) -> Result<Value> {
        self.gateway
            .send(RequestDescriptor::get(Backend::Auth, format!("{AUTH_PREFIX}/profile/")))
    }

    fn store_access_token(&self, response: &Value) {
        if let Some(token) = response
            .get("tokens")
            .and_then(|tokens| tokens.get("access"))
            .and_then(Value::as_str)
        {
            self.gateway.session().set(token);
        }
    }
}
