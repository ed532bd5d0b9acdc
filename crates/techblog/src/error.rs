//! Unified error type for the Techblog client.

use techblog_gateway::GatewayError;
use techblog_protocol::ProtocolError;
use techblog_session::SessionError;
use techblog_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `techblog` facade you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TechblogError {
    /// The request could not be dispatched or never got a response.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A transport could not be constructed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body failed to encode or decode, or an input failed validation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session could not be persisted.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The backend answered with a non-2xx status.
    ///
    /// For 401/403 on protected endpoints the session has already been
    /// cleared by the time this is returned.
    #[error("{context} failed: HTTP {status}")]
    Status { status: u16, context: &'static str },

    /// The operation needs a logged-in user and there is no token.
    /// Nothing was sent to the backend.
    #[error("you must be logged in to {0}")]
    NotLoggedIn(&'static str),
}

impl TechblogError {
    /// The HTTP status, when the backend answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// `true` for 401/403 answers, i.e. the session was just ended.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
