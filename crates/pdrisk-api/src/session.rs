//! Session token handling.
//!
//! The bearer token lives in an explicit, cheaply clonable handle injected
//! into the clients at construction, not in a process global. Tokens are
//! never persisted; a new process starts unauthenticated.

use std::sync::{Arc, Mutex};

/// Shared holder of the current bearer token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<Mutex<Option<String>>>,
}

impl Session {
    /// Create an empty, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a bearer token, replacing any previous one.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.lock().unwrap() = Some(token.into());
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Drop the stored token.
    pub fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }
}
