//! Backend endpoint configuration.
//!
//! Both base URLs live in one config object and are independently
//! overridable from the environment. Defaults match the local development
//! setup: the prediction service on port 8000 and the auth service on
//! port 8001.

use std::time::Duration;

/// Default base URL of the prediction backend.
pub const DEFAULT_PREDICTION_URL: &str = "http://localhost:8000/api/v1";

/// Default base URL of the auth backend.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8001";

/// Environment variable overriding the prediction base URL.
pub const PREDICTION_URL_ENV: &str = "PDRISK_API_URL";

/// Environment variable overriding the auth base URL.
pub const AUTH_URL_ENV: &str = "PDRISK_AUTH_URL";

/// Timeout applied to the transport client at construction.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which backend a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The authentication service.
    Auth,
    /// The prediction / feature-importance service.
    Prediction,
}

/// Base URLs and timeout for the two backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the auth backend, no trailing slash.
    pub auth_base_url: String,
    /// Base URL of the prediction backend, no trailing slash.
    pub prediction_base_url: String,
    /// Transport timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            prediction_base_url: DEFAULT_PREDICTION_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Build a config from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// The indirection keeps env resolution testable without mutating the
    /// process environment.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(PREDICTION_URL_ENV) {
            config.prediction_base_url = normalize_base_url(&url);
        }
        if let Some(url) = lookup(AUTH_URL_ENV) {
            config.auth_base_url = normalize_base_url(&url);
        }
        config
    }

    /// Resolve the base URL for a target backend.
    #[must_use]
    pub fn base_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Auth => &self.auth_base_url,
            Backend::Prediction => &self.prediction_base_url,
        }
    }
}

/// Strip a trailing slash so that path concatenation stays predictable.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.prediction_base_url, DEFAULT_PREDICTION_URL);
        assert_eq!(config.auth_base_url, DEFAULT_AUTH_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides_both_backends() {
        let config = ApiConfig::from_env_with(|key| match key {
            PREDICTION_URL_ENV => Some("https://api.example.org/api/v1/".to_string()),
            AUTH_URL_ENV => Some("https://auth.example.org".to_string()),
            _ => None,
        });
        assert_eq!(config.prediction_base_url, "https://api.example.org/api/v1");
        assert_eq!(config.auth_base_url, "https://auth.example.org");
    }

    #[test]
    fn test_missing_env_falls_back_to_defaults() {
        let config = ApiConfig::from_env_with(|_| None);
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_base_url_resolution() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(Backend::Auth), DEFAULT_AUTH_URL);
        assert_eq!(config.base_url(Backend::Prediction), DEFAULT_PREDICTION_URL);
    }
}
