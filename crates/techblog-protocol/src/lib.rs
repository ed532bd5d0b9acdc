//! Wire protocol for the Techblog API.
//!
//! This crate defines the "language" spoken between the client and the
//! blogging backend:
//!
//! - **Types** ([`Article`], [`Comment`], [`Tag`], [`LoginResponse`]):
//!   the JSON documents the backend sends back.
//! - **Requests** ([`LoginRequest`], [`ArticleInput`], [`CommentInput`]):
//!   the JSON documents we send, plus the small form helpers that build them.
//! - **Endpoints** ([`Endpoint`], [`ArticleFilter`]): the relative paths
//!   each operation talks to.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those documents are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong on the way.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about HTTP, tokens, or sessions. It
//! only knows what the backend's documents look like and where they live.
//!
//! ```text
//! Transport (bytes) → Protocol (Article, Comment, ...) → Client (typed calls)
//! ```

mod codec;
mod endpoint;
mod error;
mod requests;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use endpoint::{ArticleFilter, Endpoint};
pub use error::ProtocolError;
pub use requests::{
    join_tag_names, parse_tag_list, ArticleInput, CommentInput, LoginRequest,
};
pub use types::{Article, ArticleId, Comment, CommentId, LoginResponse, Tag};
