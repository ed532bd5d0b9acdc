//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in the shape of the data
//! (encoding, decoding, or a form that failed its checks), not in the
//! network or the session.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: the backend answered with an HTML error page, a
    /// field changed type, or the body was empty.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A request document failed its local checks before being sent.
    ///
    /// The only checks performed are emptiness checks; everything else is
    /// the backend's business.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
