//! In-memory session backing both traits.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::{SessionController, SessionStore};

/// In-memory key-value session with a recorded current route.
///
/// `logout` clears every stored value; `navigate_to_login` records the login
/// route so the host (or a test) can observe where the session was sent.
/// Share behind an `Arc` to use one instance as both store and controller.
pub struct MemorySession {
    values: RwLock<HashMap<String, String>>,
    route: RwLock<Option<String>>,
    login_route: String,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::with_login_route("/auth/login")
    }

    pub fn with_login_route(login_route: impl Into<String>) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            route: RwLock::new(None),
            login_route: login_route.into(),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// The route last navigated to, if any.
    pub fn route(&self) -> Option<String> {
        self.route
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl SessionController for MemorySession {
    fn logout(&self) {
        debug!("clearing session state");
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn navigate_to_login(&self) {
        *self
            .route
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(self.login_route.clone());
    }
}
