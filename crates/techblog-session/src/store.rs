//! The storage seam for the session token.
//!
//! Instead of reaching into some ambient global, the gateway is handed a
//! [`SessionStore`] when it is built. Production code passes a
//! [`FileSessionStore`](crate::FileSessionStore); tests pass a
//! [`MemorySessionStore`] they can inspect afterwards.

use std::sync::{Arc, Mutex, MutexGuard};

/// Key under which the token is persisted.
pub const TOKEN_KEY: &str = "authToken";

/// Holds at most one opaque session token.
///
/// All methods take `&self`: a store is shared between the gateway (which
/// reads and clears it) and the application (which sets it after login),
/// so implementations use interior mutability.
///
/// # Example
///
/// ```rust
/// use techblog_session::{MemorySessionStore, SessionStore};
///
/// let store = MemorySessionStore::new();
/// assert!(!store.is_logged_in());
///
/// store.set_token("abc123");
/// assert_eq!(store.get_token().as_deref(), Some("abc123"));
///
/// store.clear_token();
/// store.clear_token(); // idempotent
/// assert!(!store.is_logged_in());
/// ```
pub trait SessionStore: Send + Sync {
    /// Returns the stored token, or `None` when nobody is logged in.
    fn get_token(&self) -> Option<String>;

    /// Stores `token`, replacing any previous one.
    fn set_token(&self, token: &str);

    /// Forgets the stored token. Clearing an empty store is a no-op.
    fn clear_token(&self);

    /// `true` iff a token is stored. Presence only, never validity.
    fn is_logged_in(&self) -> bool {
        self.get_token().is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }

    fn set_token(&self, token: &str) {
        (**self).set_token(token)
    }

    fn clear_token(&self) {
        (**self).clear_token()
    }

    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// A process-local store. The token is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts out logged in.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        // A panic while holding this lock can't leave a half-written
        // Option behind, so a poisoned lock is still usable.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set_token(&self, token: &str) {
        *self.slot() = Some(token.to_string());
        tracing::debug!("session token stored");
    }

    fn clear_token(&self) {
        if self.slot().take().is_some() {
            tracing::debug!("session token cleared");
        }
    }
}
