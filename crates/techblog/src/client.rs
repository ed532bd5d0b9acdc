//! `BlogClient` builder and typed API calls.
//!
//! This is the entry point for talking to the blogging backend. It ties the
//! layers together: protocol (documents and paths) → gateway (token and
//! forced logout) → transport (HTTP).
//!
//! Every call checks the response status itself, the way each view of a
//! front-end would: a non-2xx answer becomes [`TechblogError::Status`].

use std::sync::Arc;
#[cfg(feature = "reqwest")]
use std::time::Duration;

use serde::de::DeserializeOwned;
use techblog_gateway::{AuthFailureHook, Gateway, GatewayConfig, RequestOptions};
use techblog_protocol::{
    Article, ArticleFilter, ArticleId, ArticleInput, Codec, Comment,
    CommentInput, Endpoint, JsonCodec, LoginRequest, LoginResponse, Tag,
};
use techblog_session::{SessionState, SessionStore};
use techblog_transport::{HttpResponse, HttpTransport};
#[cfg(feature = "reqwest")]
use techblog_transport::ReqwestTransport;

use crate::TechblogError;

/// An article together with its comments, as shown on a detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDetail {
    pub article: Article,
    pub comments: Vec<Comment>,
}

/// Everything a list page shows: the tag bar and the filtered articles.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub tags: Vec<Tag>,
    pub articles: Vec<Article>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`BlogClient`].
///
/// # Example
///
/// ```rust,no_run
/// use techblog::prelude::*;
///
/// # fn main() -> Result<(), TechblogError> {
/// let client = BlogClientBuilder::new()
///     .base_url("http://localhost:8080/api")
///     .on_auth_failure(|f: &AuthFailure| eprintln!("please log in again ({})", f.redirect_to))
///     .build(FileSessionStore::new("session.json"))?;
/// # Ok(())
/// # }
/// ```
pub struct BlogClientBuilder {
    config: GatewayConfig,
    hook: Option<Arc<dyn AuthFailureHook>>,
    #[cfg(feature = "reqwest")]
    timeout: Option<Duration>,
}

impl BlogClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
            hook: None,
            #[cfg(feature = "reqwest")]
            timeout: None,
        }
    }

    /// Replaces the whole gateway configuration.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API base URL (origin plus `/api`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    /// Sets the hook notified when a rejected token forces a logout.
    pub fn on_auth_failure(mut self, hook: impl AuthFailureHook) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Sets the per-request timeout of the default transport.
    #[cfg(feature = "reqwest")]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a client on the default `reqwest` transport.
    #[cfg(feature = "reqwest")]
    pub fn build<S: SessionStore>(
        self,
        session: S,
    ) -> Result<BlogClient<ReqwestTransport, S>, TechblogError> {
        let mut transport = ReqwestTransport::builder();
        if let Some(timeout) = self.timeout {
            transport = transport.timeout(timeout);
        }
        let transport = transport.build()?;
        Ok(self.build_with_transport(transport, session))
    }

    /// Builds a client on any transport.
    pub fn build_with_transport<T, S>(self, transport: T, session: S) -> BlogClient<T, S>
    where
        T: HttpTransport,
        S: SessionStore,
    {
        tracing::debug!(base_url = %self.config.base_url, "building blog client");
        let mut gateway = Gateway::new(transport, session, self.config);
        if let Some(hook) = self.hook {
            gateway = gateway.with_shared_hook(hook);
        }
        BlogClient {
            gateway,
            codec: JsonCodec,
        }
    }
}

impl Default for BlogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// BlogClient
// ---------------------------------------------------------------------------

/// Typed access to the blogging API.
///
/// Reads work anonymously. Writes (articles, comments) need a session
/// token; without one they fail with [`TechblogError::NotLoggedIn`] before
/// anything is sent.
pub struct BlogClient<T, S, C = JsonCodec> {
    gateway: Gateway<T, S>,
    codec: C,
}

impl<T, S, C> BlogClient<T, S, C>
where
    T: HttpTransport,
    S: SessionStore,
    C: Codec,
{
    /// Wraps an existing gateway with a specific codec.
    pub fn from_gateway(gateway: Gateway<T, S>, codec: C) -> Self {
        Self { gateway, codec }
    }

    pub fn gateway(&self) -> &Gateway<T, S> {
        &self.gateway
    }

    pub fn session(&self) -> &S {
        self.gateway.session()
    }

    // -- session ------------------------------------------------------------

    /// Exchanges credentials for a token and stores it.
    ///
    /// A rejected login leaves any existing session untouched.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), TechblogError> {
        let credentials = LoginRequest::new(email, password);
        credentials.validate()?;

        let body = self.codec.encode(&credentials)?;
        // Must be the gateway's configured login endpoint.
        let endpoint = &self.gateway.config().login_endpoint;
        let response = self
            .gateway
            .request(endpoint, self.write_options(RequestOptions::post(body))?)
            .await?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "login rejected");
            return Err(TechblogError::Status {
                status: response.status,
                context: "login",
            });
        }

        let LoginResponse { token } = self.codec.decode(&response.body)?;
        self.session().set_token(&token);
        tracing::info!("login succeeded");
        Ok(())
    }

    /// Forgets the stored token. Safe to call when already logged out.
    pub fn logout(&self) {
        self.session().clear_token();
        tracing::info!("logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_logged_in()
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::of(self.session())
    }

    // -- articles -----------------------------------------------------------

    /// Lists articles, optionally narrowed by search query or tag.
    pub async fn list_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<Article>, TechblogError> {
        self.get_json(filter.endpoint(), "list articles").await
    }

    pub async fn get_article(&self, id: ArticleId) -> Result<Article, TechblogError> {
        self.get_json(Endpoint::Article(id), "load article").await
    }

    /// Publishes a new article as the logged-in user.
    pub async fn create_article(
        &self,
        input: &ArticleInput,
    ) -> Result<Article, TechblogError> {
        self.require_login("create articles")?;
        input.validate()?;
        let body = self.codec.encode(input)?;
        let response = self
            .gateway
            .request(&Endpoint::Articles.path(), self.write_options(RequestOptions::post(body))?)
            .await?;
        let article: Article = self.decode_success(response, "create article")?;
        tracing::info!(id = %article.id, "article created");
        Ok(article)
    }

    /// Replaces title, content, image, and tags of an article.
    pub async fn update_article(
        &self,
        id: ArticleId,
        input: &ArticleInput,
    ) -> Result<Article, TechblogError> {
        self.require_login("edit articles")?;
        input.validate()?;
        let body = self.codec.encode(input)?;
        let response = self
            .gateway
            .request(&Endpoint::Article(id).path(), self.write_options(RequestOptions::put(body))?)
            .await?;
        let article = self.decode_success(response, "update article")?;
        tracing::info!(%id, "article updated");
        Ok(article)
    }

    /// Deletes an article and, server-side, its comments.
    pub async fn delete_article(&self, id: ArticleId) -> Result<(), TechblogError> {
        self.require_login("delete articles")?;
        let response = self
            .gateway
            .request(&Endpoint::Article(id).path(), RequestOptions::delete())
            .await?;
        check_status(&response, "delete article")?;
        tracing::info!(%id, "article deleted");
        Ok(())
    }

    // -- comments -----------------------------------------------------------

    pub async fn list_comments(&self, id: ArticleId) -> Result<Vec<Comment>, TechblogError> {
        self.get_json(Endpoint::Comments(id), "load comments").await
    }

    /// Posts a comment as the logged-in user.
    pub async fn post_comment(
        &self,
        id: ArticleId,
        input: &CommentInput,
    ) -> Result<Comment, TechblogError> {
        self.require_login("comment")?;
        input.validate()?;
        let body = self.codec.encode(input)?;
        let response = self
            .gateway
            .request(&Endpoint::Comments(id).path(), self.write_options(RequestOptions::post(body))?)
            .await?;
        self.decode_success(response, "post comment")
    }

    // -- tags ---------------------------------------------------------------

    pub async fn list_tags(&self) -> Result<Vec<Tag>, TechblogError> {
        self.get_json(Endpoint::Tags, "list tags").await
    }

    // -- pages --------------------------------------------------------------

    /// Loads an article, then its comments.
    ///
    /// Comments are only requested once the article is known to exist.
    pub async fn article_with_comments(
        &self,
        id: ArticleId,
    ) -> Result<ArticleDetail, TechblogError> {
        let article = self.get_article(id).await?;
        let comments = self.list_comments(id).await?;
        Ok(ArticleDetail { article, comments })
    }

    /// Loads the tag bar and the filtered article list concurrently.
    ///
    /// The tag bar is decoration: if it fails to load, the failure is
    /// logged and the listing comes back with no tags. A failed article
    /// fetch fails the whole call.
    pub async fn listing(&self, filter: &ArticleFilter) -> Result<Listing, TechblogError> {
        let (tags, articles) =
            futures_util::future::join(self.list_tags(), self.list_articles(filter)).await;

        let tags = tags.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load tags");
            Vec::new()
        });
        Ok(Listing {
            tags,
            articles: articles?,
        })
    }

    // -- helpers ------------------------------------------------------------

    async fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        context: &'static str,
    ) -> Result<R, TechblogError> {
        let response = self.gateway.get(&endpoint.path()).await?;
        self.decode_success(response, context)
    }

    fn decode_success<R: DeserializeOwned>(
        &self,
        response: HttpResponse,
        context: &'static str,
    ) -> Result<R, TechblogError> {
        check_status(&response, context)?;
        Ok(self.codec.decode(&response.body)?)
    }

    /// Tags a body-carrying request with the codec's content type.
    fn write_options(&self, options: RequestOptions) -> Result<RequestOptions, TechblogError> {
        Ok(options.try_header("content-type", self.codec.content_type())?)
    }

    fn require_login(&self, action: &'static str) -> Result<(), TechblogError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(TechblogError::NotLoggedIn(action))
        }
    }
}

fn check_status(response: &HttpResponse, context: &'static str) -> Result<(), TechblogError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::debug!(status = response.status, context, "API call unsuccessful");
    Err(TechblogError::Status {
        status: response.status,
        context,
    })
}
