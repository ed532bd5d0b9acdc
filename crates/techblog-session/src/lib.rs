//! Login token storage for the Techblog client.
//!
//! This crate answers one question: "is someone logged in, and with which
//! token?"
//!
//! 1. **Storage seam**: the [`SessionStore`] trait (get, set, clear)
//! 2. **Implementations**: [`MemorySessionStore`] for tests and embedding,
//!    [`FileSessionStore`] for a token that survives restarts
//! 3. **Lifecycle**: [`SessionState`], `Anonymous` or `Authenticated`
//!
//! # How it fits in the stack
//!
//! ```text
//! Gateway (above)  ← reads the token on every request, clears it on 401/403
//!     ↕
//! Session Layer (this crate)  ← owns the one token value
//!     ↕
//! Durable storage (below)  ← a small JSON file, or nothing at all
//! ```
//!
//! The token is opaque. Nothing here checks its validity or expiry: a
//! stale token is only discovered when the backend rejects a request.

mod error;
mod file;
mod session;
mod store;

pub use error::SessionError;
pub use file::FileSessionStore;
pub use session::SessionState;
pub use store::{MemorySessionStore, SessionStore, TOKEN_KEY};
