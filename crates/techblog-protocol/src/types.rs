//! Documents the backend sends back.
//!
//! Every type here mirrors a JSON shape served by the blogging API. Field
//! names are camelCase on the wire (`imageUrl`, `authorName`, `canEdit`),
//! so each struct carries `#[serde(rename_all = "camelCase")]`.
//!
//! The backend is loose about optional data: an article may have no image,
//! no author (legacy rows), or no timestamp. Those fields are `Option`s and
//! default to `None` when missing, rather than failing the whole decode.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of an article.
///
/// A newtype over `u64` so an article id can't be passed where a comment
/// id is expected. `#[serde(transparent)]` keeps it a bare number in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ArticleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A tag attached to articles. Names are stored lowercase by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A blog article as returned by the list, detail, create, and update
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,

    /// Optional cover image.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Server-local timestamp, no zone information.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub author_id: Option<u64>,

    #[serde(default)]
    pub author_name: Option<String>,

    /// Whether the caller's token belongs to the author. Computed per
    /// request by the backend; always `false` for anonymous callers.
    #[serde(default)]
    pub can_edit: bool,
}

impl Article {
    /// Name of the first tag, or `"general"` for untagged articles.
    pub fn primary_tag(&self) -> &str {
        self.tags.first().map_or("general", |t| t.name.as_str())
    }

    /// Author name, or `"unknown author"` when the backend has none.
    pub fn author_or_unknown(&self) -> &str {
        self.author_name.as_deref().unwrap_or("unknown author")
    }

    /// The first `max_chars` characters of the content, for list views.
    ///
    /// Cuts on a char boundary, never inside a multi-byte character.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment on an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token. The client never looks inside it.
    pub token: String,
}
