//! Session lifecycle.

use std::fmt;

use crate::SessionStore;

/// Whether a user is logged in.
///
/// ```text
///   Anonymous ──(login success)──→ Authenticated
///       ↑                               │
///       └──(logout | 401/403 on a protected call)
/// ```
///
/// There is no separate "expired" state: an expired token looks
/// `Authenticated` until the backend rejects it, and then it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    /// Reads the current state from a store.
    pub fn of<S: SessionStore + ?Sized>(store: &S) -> Self {
        if store.is_logged_in() {
            Self::Authenticated
        } else {
            Self::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::Authenticated => write!(f, "Authenticated"),
        }
    }
}
