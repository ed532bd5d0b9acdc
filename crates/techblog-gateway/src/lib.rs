//! Authenticated request gateway for the Techblog API.
//!
//! Every backend call goes through one [`Gateway`]. It is the single place
//! that:
//!
//! 1. **Merges headers**: `Content-Type: application/json` by default,
//!    caller headers on top
//! 2. **Injects the bearer token**: `Authorization: Bearer <token>` iff the
//!    [`SessionStore`](techblog_session::SessionStore) holds one, and never
//!    on the login endpoint
//! 3. **Reacts to 401/403**: clears the session and notifies an
//!    [`AuthFailureHook`] with the login route, for every endpoint except
//!    login itself
//!
//! HTTP error statuses are returned to the caller untouched. Only failures
//! to complete the exchange become [`GatewayError`]s.
//!
//! # How it fits in the stack
//!
//! ```text
//! Client / views (above)  ← typed calls, check response status themselves
//!     ↕
//! Gateway (this crate)  ← headers, token, forced logout
//!     ↕                 ↕
//! Session store     HTTP transport (below)
//! ```

mod config;
mod error;
mod gateway;
mod hook;
mod options;

pub use config::{GatewayConfig, API_URL_ENV};
pub use error::GatewayError;
pub use gateway::Gateway;
pub use hook::{AuthFailure, AuthFailureHook, NoopHook};
pub use options::RequestOptions;
