//! Error types for the gateway.

use techblog_transport::TransportError;

/// Errors returned by [`Gateway::request`](crate::Gateway::request).
///
/// There is intentionally no variant for HTTP error statuses: a 404 or a
/// 500 is a response, and the caller decides what it means.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP exchange never completed (refused, DNS, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The endpoint is not a path relative to the base URL.
    #[error("invalid endpoint {0:?}: must start with '/'")]
    InvalidEndpoint(String),

    /// A header name or value could not be encoded.
    #[error("invalid header {0:?}")]
    InvalidHeader(String),
}
