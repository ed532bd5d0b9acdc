//! The gateway: one choke-point for every backend call.

use std::sync::Arc;

use techblog_session::SessionStore;
use techblog_transport::header::{AUTHORIZATION, CONTENT_TYPE};
use techblog_transport::{HeaderMap, HeaderValue, HttpRequest, HttpResponse, HttpTransport};

use crate::{
    AuthFailure, AuthFailureHook, GatewayConfig, GatewayError, NoopHook,
    RequestOptions,
};

const JSON: &str = "application/json";

/// Issues authenticated requests and handles forced logout.
///
/// Generic over the transport `T` and the session store `S` so tests can
/// plug in a recording transport and an in-memory store, while the real
/// application uses `reqwest` and a file-backed store.
///
/// ## Request pipeline
///
/// ```text
/// request(endpoint, options)
///   → merge headers (defaults < caller)
///   → Authorization: Bearer <token>   (iff a token is stored, never on login)
///   → transport.send(base_url + endpoint)
///   → 401/403 and not login?  → clear token, notify hook
///   → return the response as-is
/// ```
pub struct Gateway<T, S> {
    transport: T,
    session: S,
    config: GatewayConfig,
    hook: Arc<dyn AuthFailureHook>,
}

impl<T, S> Gateway<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    /// Creates a gateway with a [`NoopHook`].
    pub fn new(transport: T, session: S, config: GatewayConfig) -> Self {
        Self {
            transport,
            session,
            config,
            hook: Arc::new(NoopHook),
        }
    }

    /// Replaces the auth-failure hook.
    pub fn with_hook(mut self, hook: impl AuthFailureHook) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Replaces the auth-failure hook with one that is already shared.
    pub fn with_shared_hook(mut self, hook: Arc<dyn AuthFailureHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The injected session store.
    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for a relative endpoint.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Sends a request to `endpoint` (relative to the base URL).
    ///
    /// Returns every response the backend produces, including 4xx and 5xx.
    /// On 401/403 from anything but the login endpoint the session is
    /// cleared and the hook notified BEFORE the response is returned.
    ///
    /// # Errors
    /// - [`GatewayError::InvalidEndpoint`]: `endpoint` doesn't start with `/`
    /// - [`GatewayError::InvalidHeader`]: the stored token can't be sent
    /// - [`GatewayError::Transport`]: no response was received
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, GatewayError> {
        let request = self.build_request(endpoint, options)?;
        let method = request.method;

        tracing::debug!(
            %method,
            endpoint,
            authenticated = request.headers.contains_key(AUTHORIZATION),
            "dispatching API request"
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%method, endpoint, error = %e, "API call failed");
                return Err(GatewayError::Transport(e));
            }
        };

        tracing::debug!(%method, endpoint, status = response.status, "API response");

        if response.is_auth_failure() && !self.is_login_endpoint(endpoint) {
            self.force_logout(endpoint, response.status);
        }

        Ok(response)
    }

    /// Shorthand for a plain GET.
    pub async fn get(&self, endpoint: &str) -> Result<HttpResponse, GatewayError> {
        self.request(endpoint, RequestOptions::get()).await
    }

    /// Builds the outgoing request without sending it.
    ///
    /// Exposed so the header rules can be checked without a transport.
    pub fn build_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HttpRequest, GatewayError> {
        if !endpoint.starts_with('/') {
            return Err(GatewayError::InvalidEndpoint(endpoint.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.extend(options.headers);

        // The caller never decides authentication: the stored token does.
        // Login is unauthenticated and never carries a token.
        headers.remove(AUTHORIZATION);
        if !self.is_login_endpoint(endpoint) {
            if let Some(token) = self.session.get_token() {
                headers.insert(AUTHORIZATION, bearer(&token)?);
            }
        }

        Ok(HttpRequest {
            method: options.method,
            url: self.url_for(endpoint),
            headers,
            body: options.body,
        })
    }

    /// `true` only for the exact login endpoint. `/auth/login?next=x` is
    /// a different endpoint and gets no exemption.
    fn is_login_endpoint(&self, endpoint: &str) -> bool {
        endpoint == self.config.login_endpoint
    }

    fn force_logout(&self, endpoint: &str, status: u16) {
        tracing::warn!(
            endpoint,
            status,
            "authorization rejected, ending session"
        );
        self.session.clear_token();
        self.hook.on_auth_failure(&AuthFailure {
            status,
            endpoint: endpoint.to_string(),
            redirect_to: self.config.login_route.clone(),
        });
    }
}

fn bearer(token: &str) -> Result<HeaderValue, GatewayError> {
    let mut value = HeaderValue::try_from(format!("Bearer {token}")).map_err(|_| {
        tracing::error!("stored session token is not a valid header value");
        GatewayError::InvalidHeader(AUTHORIZATION.to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}
