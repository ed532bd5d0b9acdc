//! Integration tests for the gateway request pipeline.
//!
//! A scripted transport stands in for the network: it records every
//! request it is handed and answers with a status chosen per path. This
//! lets us assert on exactly what would have gone over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use techblog_gateway::{AuthFailure, Gateway, GatewayConfig, GatewayError, RequestOptions};
use techblog_session::{MemorySessionStore, SessionStore};
use techblog_transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

// =========================================================================
// Scripted transport and recording hook
// =========================================================================

#[derive(Default)]
struct ScriptedTransport {
    /// Status per URL path (query string stripped). Unlisted paths get 200.
    statuses: HashMap<String, u16>,
    /// Paths that fail at the transport level.
    unreachable: Vec<String>,
    /// Artificial latency per path, to interleave concurrent requests.
    delays: HashMap<String, Duration>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn respond(mut self, path: &str, status: u16) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }

    fn unreachable(mut self, path: &str) -> Self {
        self.unreachable.push(path.to_string());
        self
    }

    fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

fn header(request: &HttpRequest, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}

fn path_of(url: &str) -> String {
    let after_api = url.split("/api").nth(1).unwrap_or(url);
    after_api.split('?').next().unwrap_or(after_api).to_string()
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = path_of(&request.url);
        self.sent.lock().unwrap().push(request);

        if let Some(delay) = self.delays.get(&path) {
            tokio::time::sleep(*delay).await;
        }
        if self.unreachable.contains(&path) {
            return Err(TransportError::Connect("connection refused".into()));
        }
        let status = self.statuses.get(&path).copied().unwrap_or(200);
        Ok(HttpResponse::new(status, format!("{{\"path\":\"{path}\"}}")))
    }
}

type Seen = Arc<Mutex<Vec<AuthFailure>>>;

fn recording_hook() -> (Seen, impl Fn(&AuthFailure) + Send + Sync + 'static) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |f: &AuthFailure| sink.lock().unwrap().push(f.clone()))
}

fn gateway(
    transport: ScriptedTransport,
    token: Option<&str>,
) -> (Gateway<Arc<ScriptedTransport>, Arc<MemorySessionStore>>, Arc<ScriptedTransport>, Arc<MemorySessionStore>, Seen) {
    let transport = Arc::new(transport);
    let store = Arc::new(match token {
        Some(t) => MemorySessionStore::with_token(t),
        None => MemorySessionStore::new(),
    });
    let (seen, hook) = recording_hook();
    let gw = Gateway::new(Arc::clone(&transport), Arc::clone(&store), GatewayConfig::default())
        .with_hook(hook);
    (gw, transport, store, seen)
}

// =========================================================================
// Header and URL rules
// =========================================================================

#[tokio::test]
async fn test_anonymous_get_has_defaults_and_no_authorization() {
    let (gw, transport, _, _) = gateway(ScriptedTransport::default(), None);

    let resp = gw.request("/articles", RequestOptions::default()).await.unwrap();
    assert_eq!(resp.status, 200);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "http://localhost:8080/api/articles");
    assert_eq!(header(&sent[0], "Content-Type").as_deref(), Some("application/json"));
    assert!(!sent[0].headers.contains_key("Authorization"));
}

#[tokio::test]
async fn test_authenticated_post_carries_exact_token_and_body() {
    let (gw, transport, _, _) = gateway(ScriptedTransport::default(), Some("abc123"));

    gw.request("/articles", RequestOptions::post(r#"{"title":"x"}"#))
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(header(&sent[0], "Authorization").as_deref(), Some("Bearer abc123"));
    assert_eq!(header(&sent[0], "Content-Type").as_deref(), Some("application/json"));
    assert_eq!(sent[0].body.as_deref(), Some(&br#"{"title":"x"}"#[..]));
}

#[tokio::test]
async fn test_token_is_read_at_dispatch_time() {
    let (gw, transport, store, _) = gateway(ScriptedTransport::default(), None);

    gw.get("/tags").await.unwrap();
    store.set_token("later");
    gw.get("/tags").await.unwrap();
    store.clear_token();
    gw.get("/tags").await.unwrap();

    let auth: Vec<_> = transport
        .sent()
        .iter()
        .map(|r| header(r, "Authorization"))
        .collect();
    assert_eq!(auth, vec![None, Some("Bearer later".to_string()), None]);
}

// =========================================================================
// Forced logout
// =========================================================================

#[tokio::test]
async fn test_401_on_protected_endpoint_clears_session_and_notifies() {
    let transport = ScriptedTransport::default().respond("/articles/5/comments", 401);
    let (gw, _, store, seen) = gateway(transport, Some("stale"));

    let resp = gw.get("/articles/5/comments").await.unwrap();

    // The response still reaches the caller.
    assert_eq!(resp.status, 401);
    assert!(!store.is_logged_in());
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[AuthFailure {
            status: 401,
            endpoint: "/articles/5/comments".into(),
            redirect_to: "/login".into(),
        }]
    );
}

#[tokio::test]
async fn test_403_also_forces_logout() {
    let transport = ScriptedTransport::default().respond("/articles/9", 403);
    let (gw, _, store, seen) = gateway(transport, Some("tok"));

    let resp = gw.request("/articles/9", RequestOptions::delete()).await.unwrap();
    assert_eq!(resp.status, 403);
    assert!(!store.is_logged_in());
    assert_eq!(seen.lock().unwrap()[0].status, 403);
}

#[tokio::test]
async fn test_401_on_login_endpoint_does_not_logout() {
    let transport = ScriptedTransport::default().respond("/auth/login", 401);
    let (gw, _, store, seen) = gateway(transport, Some("keep-me"));

    let resp = gw
        .request("/auth/login", RequestOptions::post(r#"{"email":"a","password":"b"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(store.get_token().as_deref(), Some("keep-me"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_stale_token_sends_no_authorization() {
    let (gw, transport, store, _) = gateway(ScriptedTransport::default(), Some("stale"));

    gw.request("/auth/login", RequestOptions::post("{}")).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert!(!sent[0].headers.contains_key("Authorization"));
    // Other endpoints still use the token.
    gw.get("/tags").await.unwrap();
    assert_eq!(header(&transport.sent()[1], "Authorization").as_deref(), Some("Bearer stale"));
    assert!(store.is_logged_in());
}

#[tokio::test]
async fn test_401_on_login_path_with_query_still_forces_logout() {
    let transport = ScriptedTransport::default().respond("/auth/login", 401);
    let (gw, transport, store, seen) = gateway(transport, Some("tok"));

    let resp = gw.get("/auth/login?x=1").await.unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(store.get_token(), None);
    assert_eq!(seen.lock().unwrap()[0].endpoint, "/auth/login?x=1");
    // Not the login endpoint, so the token was sent.
    assert_eq!(header(&transport.sent()[0], "Authorization").as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn test_404_leaves_session_alone_and_returns_response_unchanged() {
    let transport = ScriptedTransport::default().respond("/articles/404", 404);
    let (gw, _, store, seen) = gateway(transport, Some("tok"));

    let resp = gw.get("/articles/404").await.unwrap();
    assert_eq!(resp.status, 404);
    assert_eq!(resp.text(), r#"{"path":"/articles/404"}"#);
    assert!(store.is_logged_in());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_500_is_not_an_error() {
    let transport = ScriptedTransport::default().respond("/tags", 500);
    let (gw, _, store, _) = gateway(transport, Some("tok"));

    let resp = gw.get("/tags").await.unwrap();
    assert!(!resp.is_success());
    assert!(store.is_logged_in());
}

#[tokio::test]
async fn test_anonymous_401_still_notifies() {
    let transport = ScriptedTransport::default().respond("/articles", 401);
    let (gw, _, store, seen) = gateway(transport, None);

    gw.request("/articles", RequestOptions::post("{}")).await.unwrap();
    assert!(!store.is_logged_in());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

// =========================================================================
// Transport failures
// =========================================================================

#[tokio::test]
async fn test_transport_failure_is_returned_as_error() {
    let transport = ScriptedTransport::default().unreachable("/articles");
    let (gw, _, store, seen) = gateway(transport, Some("tok"));

    let err = gw.get("/articles").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(TransportError::Connect(_))));
    // A network failure says nothing about the session.
    assert!(store.is_logged_in());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_endpoint_never_reaches_transport() {
    let (gw, transport, _, _) = gateway(ScriptedTransport::default(), None);
    let err = gw.get("articles").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidEndpoint(_)));
    assert!(transport.sent().is_empty());
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test]
async fn test_concurrent_requests_complete_out_of_order() {
    let transport = ScriptedTransport::default()
        .delay("/articles", Duration::from_millis(30))
        .delay("/tags", Duration::from_millis(1));
    let (gw, _, _, _) = gateway(transport, None);

    let (articles, tags) = futures_util::join!(gw.get("/articles"), gw.get("/tags"));
    assert_eq!(articles.unwrap().text(), r#"{"path":"/articles"}"#);
    assert_eq!(tags.unwrap().text(), r#"{"path":"/tags"}"#);
}

#[tokio::test]
async fn test_two_simultaneous_401s_are_idempotent() {
    let transport = ScriptedTransport::default()
        .respond("/articles/1/comments", 401)
        .respond("/articles/2/comments", 401);
    let (gw, _, store, seen) = gateway(transport, Some("stale"));

    let (a, b) = futures_util::join!(
        gw.get("/articles/1/comments"),
        gw.get("/articles/2/comments")
    );
    assert_eq!(a.unwrap().status, 401);
    assert_eq!(b.unwrap().status, 401);

    assert!(!store.is_logged_in());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|f| f.redirect_to == "/login"));
}

#[tokio::test]
async fn test_channel_hook_delivers_events() {
    let transport = Arc::new(ScriptedTransport::default().respond("/tags", 401));
    let store = Arc::new(MemorySessionStore::with_token("t"));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let gw = Gateway::new(transport, Arc::clone(&store), GatewayConfig::default()).with_hook(tx);

    gw.get("/tags").await.unwrap();

    let event = rx.recv().await.expect("event should be delivered");
    assert_eq!(event.endpoint, "/tags");
    assert_eq!(event.redirect_to, "/login");
}

#[tokio::test]
async fn test_custom_config_changes_url_and_redirect() {
    let transport = Arc::new(ScriptedTransport::default().respond("/me", 401));
    let store = Arc::new(MemorySessionStore::with_token("t"));
    let (seen, hook) = recording_hook();
    let config = GatewayConfig::default()
        .base_url("https://blog.example/api/")
        .login_route("/signin");
    let gw = Gateway::new(Arc::clone(&transport), store, config).with_hook(hook);

    gw.get("/me").await.unwrap();
    assert_eq!(transport.sent()[0].url, "https://blog.example/api/me");
    assert_eq!(seen.lock().unwrap()[0].redirect_to, "/signin");
}
