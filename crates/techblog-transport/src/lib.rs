//! HTTP transport abstraction for the Techblog client.
//!
//! Provides the [`HttpTransport`] trait that the gateway dispatches
//! through, and the plain request/response values that cross it. Keeping
//! the HTTP stack behind a trait lets tests swap in a recording fake while
//! production code uses `reqwest`.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): [`ReqwestTransport`] backed by `reqwest::Client`

mod error;
mod message;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::TransportError;
pub use http::header::{self, HeaderMap, HeaderName, HeaderValue};
pub use message::{HttpRequest, HttpResponse, Method};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::{ReqwestTransport, ReqwestTransportBuilder};

use std::future::Future;
use std::sync::Arc;

/// Sends a single HTTP request and returns the response.
///
/// Implementations must return `Ok` for every response the server sends,
/// whatever its status code. `Err` is reserved for exchanges that never
/// produced a response.
pub trait HttpTransport: Send + Sync + 'static {
    /// Dispatches `request` and waits for the full response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// A shared transport is still a transport.
impl<T: HttpTransport> HttpTransport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}
