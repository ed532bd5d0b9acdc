//! Gateway configuration.

/// Environment variable that overrides the API base URL at start-up.
pub const API_URL_ENV: &str = "TECHBLOG_API_URL";

/// Where the backend lives and which paths get special treatment.
///
/// The base URL is fixed for the lifetime of a gateway. Build the config
/// once at start-up and hand it over; there is no way to change it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Origin plus the `/api` prefix, without a trailing slash.
    pub base_url: String,

    /// The unauthenticated login endpoint. A 401/403 from this path means
    /// "wrong credentials", not "session expired", so it never forces a
    /// logout.
    pub login_endpoint: String,

    /// Route handed to the [`AuthFailureHook`](crate::AuthFailureHook)
    /// when the session is forcibly ended.
    pub login_route: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            login_endpoint: "/auth/login".to_string(),
            login_route: "/login".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Defaults, with the base URL taken from [`API_URL_ENV`] when set.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().base_url(url),
            _ => Self::default(),
        }
    }

    /// Sets the base URL. Trailing slashes are trimmed so endpoints can
    /// always be appended as-is.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn login_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.login_endpoint = endpoint.into();
        self
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }
}
