//! Session collaborators injected into the authorizer.
//!
//! The authorizer never looks these up ambiently; callers pass any types
//! implementing the two traits (a single shared object behind an `Arc` can
//! serve as both, see [`MemorySession`]).

pub mod memory;

pub use memory::MemorySession;

use std::sync::Arc;

/// Read-only access to persistent client session storage.
pub trait SessionStore {
    /// Look up a stored value. Absent keys yield `None`.
    fn get(&self, key: &str) -> Option<String>;
}

/// Session lifecycle triggers. Both are fire-and-forget: the authorizer does
/// not wait on, retry, or observe their effects.
pub trait SessionController {
    /// Clear the session state.
    fn logout(&self);

    /// Move the host application to its login view.
    fn navigate_to_login(&self);
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: SessionController + ?Sized> SessionController for Arc<T> {
    fn logout(&self) {
        (**self).logout()
    }

    fn navigate_to_login(&self) {
        (**self).navigate_to_login()
    }
}
