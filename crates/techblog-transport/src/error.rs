/// Errors that can occur in the transport layer.
///
/// These are failures to complete an HTTP exchange at all. A response with
/// a 4xx or 5xx status is NOT a transport error; it is a successful
/// exchange that carries bad news.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached (refused, DNS, TLS handshake).
    #[error("connect failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request failed after the connection was established.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("reading response body failed: {0}")]
    Body(String),

    /// The request could not be built (bad URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
