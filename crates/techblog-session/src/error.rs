//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while persisting the session token.
///
/// Reads never fail: unreadable storage is treated as "no token". Only the
/// fallible write paths ([`FileSessionStore::try_set_token`] and
/// [`FileSessionStore::try_clear_token`]) return these.
///
/// [`FileSessionStore::try_set_token`]: crate::FileSessionStore::try_set_token
/// [`FileSessionStore::try_clear_token`]: crate::FileSessionStore::try_clear_token
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session file (or its temp file) could not be written.
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored entries could not be serialized.
    #[error("failed to encode session file: {0}")]
    Encode(#[from] serde_json::Error),
}
