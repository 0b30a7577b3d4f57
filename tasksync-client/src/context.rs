/// Application context
///
/// One object owns the collaborator handles, the session, and the task
/// store; the host application threads it through instead of reaching for
/// globals. Initialization happens at app start, teardown on sign-out via
/// `shutdown`.

use std::sync::Arc;
use tasksync_shared::config::Config;

use crate::backend::{AuthBackend, TaskBackend};
use crate::error::AuthError;
use crate::session::AuthSession;
use crate::store::TaskStore;

/// Owns the session and store for one application run
pub struct AppContext {
    config: Config,
    session: AuthSession,
    tasks: TaskStore,
}

impl AppContext {
    /// Wires the session and store to the given collaborators
    ///
    /// The same object may implement both traits (the in-memory backend
    /// does); pass two clones of the `Arc` in that case.
    pub fn new(
        config: Config,
        task_backend: Arc<dyn TaskBackend>,
        auth_backend: Arc<dyn AuthBackend>,
    ) -> Self {
        let session = AuthSession::new(auth_backend);
        let tasks = TaskStore::new(task_backend, session.clone());
        AppContext {
            config,
            session,
            tasks,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session handle
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Task store handle
    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// Signs out and stops the background session watcher
    ///
    /// The sign-out result is returned as-is; the watcher is stopped either
    /// way.
    pub async fn shutdown(self) -> Result<(), AuthError> {
        let result = self.session.sign_out().await;
        self.session.close();
        result
    }
}
