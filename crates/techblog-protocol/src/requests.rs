//! Documents the client sends, and the form helpers that build them.
//!
//! Local validation is deliberately shallow: a field is rejected only when
//! it is empty after trimming. Length limits, HTML, ownership and the like
//! are decided by the backend.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, Tag};

// ---------------------------------------------------------------------------
// LoginRequest
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Rejects an empty email or password.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_non_empty("email", &self.email)?;
        require_non_empty("password", &self.password)
    }
}

// ---------------------------------------------------------------------------
// ArticleInput
// ---------------------------------------------------------------------------

/// Body of `POST /articles` and `PUT /articles/:id`.
///
/// `image_url` is always sent, as an empty string when there is no image,
/// because that is what the backend expects from its own editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub tags: Vec<String>,
}

impl ArticleInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the cover image URL.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Sets the tags from a comma-separated string, as typed in a form.
    pub fn tags_from_str(mut self, raw: &str) -> Self {
        self.tags = parse_tag_list(raw);
        self
    }

    /// Sets the tags from an already-split list.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects an empty title or content.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("content", &self.content)
    }
}

// ---------------------------------------------------------------------------
// CommentInput
// ---------------------------------------------------------------------------

/// Body of `POST /articles/:id/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentInput {
    pub content: String,
}

impl CommentInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Rejects a comment that is empty or whitespace only.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_non_empty("comment", &self.content)
    }
}

// ---------------------------------------------------------------------------
// Tag helpers
// ---------------------------------------------------------------------------

/// Splits a comma-separated tag field into trimmed, non-empty names.
///
/// ```rust
/// use techblog_protocol::parse_tag_list;
///
/// assert_eq!(parse_tag_list("js, react,, dev "), vec!["js", "react", "dev"]);
/// ```
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins tag names back into the comma-separated form used by editors.
pub fn join_tag_names(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ProtocolError> {
    if value.trim().is_empty() {
        return Err(ProtocolError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
