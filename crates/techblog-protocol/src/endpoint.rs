//! Relative paths of the backend's endpoints.
//!
//! Every path is relative to the API base URL (e.g.
//! `http://localhost:8080/api`) and always starts with `/`. Query values
//! are percent-encoded here so callers never build URLs by hand.

use std::fmt;

use crate::ArticleId;

/// One of the backend endpoints the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /auth/login`: the only unauthenticated write.
    Login,
    /// `GET|POST /articles`
    Articles,
    /// `GET /articles/search?q=...`
    SearchArticles(String),
    /// `GET /articles/tag?name=...`
    ArticlesByTag(String),
    /// `GET|PUT|DELETE /articles/:id`
    Article(ArticleId),
    /// `GET|POST /articles/:id/comments`
    Comments(ArticleId),
    /// `GET /tags`
    Tags,
}

impl Endpoint {
    /// Path the backend serves login on. Matches the default
    /// `login_endpoint` of the gateway configuration.
    pub const LOGIN_PATH: &'static str = "/auth/login";

    /// Renders the relative path, including any query string.
    pub fn path(&self) -> String {
        match self {
            Self::Login => Self::LOGIN_PATH.to_string(),
            Self::Articles => "/articles".to_string(),
            Self::SearchArticles(q) => {
                format!("/articles/search?q={}", urlencoding::encode(q))
            }
            Self::ArticlesByTag(name) => {
                format!("/articles/tag?name={}", urlencoding::encode(name))
            }
            Self::Article(id) => format!("/articles/{id}"),
            Self::Comments(id) => format!("/articles/{id}/comments"),
            Self::Tags => "/tags".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ---------------------------------------------------------------------------
// ArticleFilter
// ---------------------------------------------------------------------------

/// How the article list should be narrowed.
///
/// A search query and a tag are mutually exclusive: typing a query clears
/// the tag and vice versa. [`ArticleFilter::from_parts`] applies that rule
/// when both come from user input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleFilter {
    /// Every article.
    #[default]
    All,
    /// Title or content contains the query.
    Search(String),
    /// Articles carrying the named tag.
    Tag(String),
}

impl ArticleFilter {
    /// Builds a filter from optional form inputs.
    ///
    /// A non-empty search wins over a tag; empty strings count as absent.
    pub fn from_parts(search: Option<&str>, tag: Option<&str>) -> Self {
        let search = search.filter(|s| !s.is_empty());
        let tag = tag.filter(|t| !t.is_empty());
        match (search, tag) {
            (Some(q), _) => Self::Search(q.to_string()),
            (None, Some(t)) => Self::Tag(t.to_string()),
            (None, None) => Self::All,
        }
    }

    /// The endpoint that serves this filter.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::All => Endpoint::Articles,
            Self::Search(q) if !q.is_empty() => {
                Endpoint::SearchArticles(q.clone())
            }
            Self::Tag(t) if !t.is_empty() => Endpoint::ArticlesByTag(t.clone()),
            _ => Endpoint::Articles,
        }
    }
}
