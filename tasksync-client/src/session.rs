/// Authenticated session state
///
/// Tracks the signed-in identity and exposes the sign-in, sign-up, and
/// sign-out flows as the only local triggers for session transitions. The
/// session also listens to the collaborator's transition feed, so a sign-out
/// the backend initiates on its own (token revocation, account disablement)
/// is observed without any local call.
///
/// State is published through a `tokio::sync::watch` channel; the host
/// application holds a receiver and re-renders on every change. The handle
/// itself is cheap to clone and share.
///
/// # State Machine
///
/// ```text
/// SignedOut → SignedIn   (sign-in / sign-up / provider success)
/// SignedIn  → SignedOut  (sign-out, or backend-initiated invalidation)
/// ```

use std::sync::Arc;
use tasksync_shared::models::User;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::backend::{AuthBackend, AuthBackendError};
use crate::error::AuthError;

/// Published snapshot of the session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Signed-in identity, if any
    pub user: Option<User>,

    /// Most recent user-facing failure notice
    pub error: Option<String>,
}

struct SessionShared {
    backend: Arc<dyn AuthBackend>,
    state: watch::Sender<SessionState>,
    watcher: CancellationToken,
}

/// Session handle
///
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct AuthSession {
    shared: Arc<SessionShared>,
}

impl AuthSession {
    /// Creates a session bound to the identity collaborator
    ///
    /// Spawns the background watcher over the collaborator's transition feed;
    /// the watcher runs until `close` is called or the feed ends.
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let shared = Arc::new(SessionShared {
            backend,
            state,
            watcher: CancellationToken::new(),
        });

        let session = AuthSession { shared };
        session.spawn_watcher();
        session
    }

    fn spawn_watcher(&self) {
        let shared = Arc::clone(&self.shared);
        let mut feed = shared.backend.watch_session();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shared.watcher.cancelled() => break,
                    event = feed.recv() => match event {
                        Some(user) => {
                            tracing::debug!(
                                signed_in = user.is_some(),
                                "session transition from backend"
                            );
                            shared.state.send_modify(|s| s.user = user);
                        }
                        None => {
                            tracing::debug!("session feed closed by backend");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Signs in with email and password
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.clear_error();
        match self.shared.backend.sign_in_with_password(email, password).await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.record_rejection(err)),
        }
    }

    /// Creates an account with a display name and signs it in
    pub async fn sign_up_with_password(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.clear_error();
        match self
            .shared
            .backend
            .sign_up_with_password(display_name, email, password)
            .await
        {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.record_rejection(err)),
        }
    }

    /// Signs in through the federated identity provider
    pub async fn sign_in_with_provider(&self) -> Result<User, AuthError> {
        self.clear_error();
        match self.shared.backend.sign_in_with_provider().await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.record_rejection(err)),
        }
    }

    /// Ends the session
    ///
    /// On failure the current user stays in place and the notice is recorded.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.clear_error();
        match self.shared.backend.sign_out().await {
            Ok(()) => {
                self.set_user(None);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(code = %err.code, "sign out failed");
                let err = AuthError::SignOut(err);
                self.shared
                    .state
                    .send_modify(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Currently signed-in identity, if any
    pub fn current_user(&self) -> Option<User> {
        self.shared.state.borrow().user.clone()
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Receiver observing every session state change
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Clears the recorded failure notice
    pub fn clear_error(&self) {
        self.shared.state.send_modify(|s| s.error = None);
    }

    /// Stops the backend transition watcher
    pub(crate) fn close(&self) {
        self.shared.watcher.cancel();
    }

    fn set_user(&self, user: Option<User>) {
        self.shared.state.send_modify(|s| {
            s.user = user;
            s.error = None;
        });
    }

    fn record_rejection(&self, err: AuthBackendError) -> AuthError {
        tracing::warn!(code = %err.code, "authentication rejected");
        let err = AuthError::from(err);
        self.shared
            .state
            .send_modify(|s| s.error = Some(err.to_string()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_default_is_signed_out() {
        let state = SessionState::default();
        assert!(state.user.is_none());
        assert!(state.error.is_none());
    }
}
