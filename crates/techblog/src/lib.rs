//! # Techblog
//!
//! Typed client for the Techblog blogging API.
//!
//! The client lists and searches articles, shows articles with their
//! comments, and, once logged in, creates, edits, and deletes articles and
//! posts comments. Every call goes through one authenticated gateway that
//! attaches the session token and ends the session when the backend
//! rejects it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use techblog::prelude::*;
//!
//! # async fn run() -> Result<(), TechblogError> {
//! let client = BlogClientBuilder::new()
//!     .build(FileSessionStore::new("session.json"))?;
//!
//! client.login("ana@techblog.dev", "secret").await?;
//! for article in client.list_articles(&ArticleFilter::Tag("rust".into())).await? {
//!     println!("{} by {}", article.title, article.author_or_unknown());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod logging;

pub use client::{ArticleDetail, BlogClient, BlogClientBuilder, Listing};
pub use error::TechblogError;

pub use techblog_gateway as gateway;
pub use techblog_protocol as protocol;
pub use techblog_session as session;
pub use techblog_transport as transport;

pub mod prelude {
    pub use crate::{ArticleDetail, BlogClient, BlogClientBuilder, Listing, TechblogError};
    pub use techblog_gateway::{AuthFailure, AuthFailureHook, Gateway, GatewayConfig, RequestOptions};
    pub use techblog_protocol::{
        Article, ArticleFilter, ArticleId, ArticleInput, Comment, CommentInput, Endpoint, Tag,
    };
    pub use techblog_session::{FileSessionStore, MemorySessionStore, SessionState, SessionStore};
    pub use techblog_transport::{HttpRequest, HttpResponse, HttpTransport, Method};
    #[cfg(feature = "reqwest")]
    pub use techblog_transport::ReqwestTransport;
}
