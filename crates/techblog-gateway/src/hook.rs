//! Notification hook for forced logouts.
//!
//! When the backend rejects a request with 401 or 403, the gateway clears
//! the session and then tells the hosting application, which decides how
//! to get the user back to the login screen. The gateway itself never
//! navigates anywhere.

use tokio::sync::mpsc;

/// Details of a forced logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    /// 401 or 403.
    pub status: u16,
    /// The endpoint whose response triggered the logout.
    pub endpoint: String,
    /// Where the application should send the user.
    pub redirect_to: String,
}

/// Receives [`AuthFailure`] notifications from the gateway.
///
/// Closures work directly:
///
/// ```rust
/// use techblog_gateway::{AuthFailure, AuthFailureHook};
///
/// fn takes_hook(_hook: impl AuthFailureHook) {}
///
/// takes_hook(|failure: &AuthFailure| {
///     eprintln!("logged out, go to {}", failure.redirect_to);
/// });
/// ```
///
/// So does an unbounded Tokio channel sender, for applications that would
/// rather `await` logout events from a UI task.
///
/// Two in-flight requests can both fail and both notify. Handlers should
/// be idempotent, just like clearing the token is.
pub trait AuthFailureHook: Send + Sync + 'static {
    fn on_auth_failure(&self, failure: &AuthFailure);
}

impl<F> AuthFailureHook for F
where
    F: Fn(&AuthFailure) + Send + Sync + 'static,
{
    fn on_auth_failure(&self, failure: &AuthFailure) {
        self(failure)
    }
}

impl AuthFailureHook for mpsc::UnboundedSender<AuthFailure> {
    fn on_auth_failure(&self, failure: &AuthFailure) {
        if self.send(failure.clone()).is_err() {
            tracing::debug!("auth failure receiver dropped");
        }
    }
}

/// A hook that does nothing. The session is still cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl AuthFailureHook for NoopHook {
    fn on_auth_failure(&self, _failure: &AuthFailure) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn failure() -> AuthFailure {
        AuthFailure {
            status: 401,
            endpoint: "/articles/5/comments".into(),
            redirect_to: "/login".into(),
        }
    }

    #[test]
    fn test_closure_hook_receives_failure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hook = move |f: &AuthFailure| sink.lock().unwrap().push(f.clone());

        hook.on_auth_failure(&failure());
        assert_eq!(seen.lock().unwrap().as_slice(), &[failure()]);
    }

    #[test]
    fn test_channel_hook_forwards_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.on_auth_failure(&failure());
        assert_eq!(rx.try_recv().unwrap(), failure());
    }

    #[test]
    fn test_channel_hook_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<AuthFailure>();
        drop(rx);
        tx.on_auth_failure(&failure());
    }
}
