//! Per-request options passed to the gateway.

use techblog_transport::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::GatewayError;

/// Method, extra headers, and body for one gateway request.
///
/// `RequestOptions::default()` is a bodiless GET with no extra headers.
///
/// ```rust
/// use techblog_gateway::RequestOptions;
/// use techblog_transport::Method;
///
/// let opts = RequestOptions::post(r#"{"title":"x"}"#)
///     .try_header("X-Trace", "1")
///     .unwrap();
/// assert_eq!(opts.method, Method::Post);
/// assert_eq!(opts.headers["x-trace"], "1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the gateway defaults. `Authorization` is ignored when a
    /// session token exists, and stripped when none does.
    pub headers: HeaderMap,
    /// Already serialized by the caller.
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self::new().method(Method::Post).body(body)
    }

    pub fn put(body: impl Into<Vec<u8>>) -> Self {
        Self::new().method(Method::Put).body(body)
    }

    pub fn delete() -> Self {
        Self::new().method(Method::Delete)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets an already validated header, replacing any earlier value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Parses and sets a header from plain strings.
    ///
    /// # Errors
    /// [`GatewayError::InvalidHeader`] if `name` is not a legal header name
    /// or `value` contains control characters.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let header_name = HeaderName::try_from(name)
            .map_err(|_| GatewayError::InvalidHeader(name.to_string()))?;
        let header_value = HeaderValue::try_from(value)
            .map_err(|_| GatewayError::InvalidHeader(name.to_string()))?;
        Ok(self.header(header_name, header_value))
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}
