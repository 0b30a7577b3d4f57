/// Core backend traits and types
///
/// This module defines the contract between the client stores and the
/// backend collaborator. Two services are involved:
///
/// - a document store holding one task collection per project, queryable by
///   owner and observable through a push feed;
/// - an identity service handling password and federated sign-in.
///
/// # Feed Semantics
///
/// `watch_tasks` returns a channel that delivers the **full current result
/// set** for the subscribed owner on every change, ordered by due date
/// ascending. Consumers replace their cache wholesale on each delivery; no
/// merge logic exists anywhere. Dropping the receiver ends the subscription.
///
/// `watch_session` delivers every session transition, including ones the
/// backend initiates on its own (token revocation, account disablement), so
/// the session layer can react without a local call having been made.
///
/// # Example
///
/// ```no_run
/// use tasksync_client::backend::{MemoryBackend, TaskBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MemoryBackend::new();
/// let mut feed = backend.watch_tasks("user-1").await?;
///
/// while let Some(tasks) = feed.recv().await {
///     println!("collection now holds {} tasks", tasks.len());
/// }
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use tasksync_shared::auth::AuthCode;
use tasksync_shared::models::{Task, TaskDraft, TaskPatch, User};
use tokio::sync::mpsc;

/// Document store errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend refused the request
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// No record with the given identifier
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend could not be reached
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Identity service failure, classified by wire code
#[derive(Debug, thiserror::Error)]
#[error("Authentication failed: {code}")]
pub struct AuthBackendError {
    /// Classified failure code
    pub code: AuthCode,

    /// Optional backend-side detail, never shown to users
    pub detail: Option<String>,
}

impl AuthBackendError {
    /// Creates an error from a classified code
    pub fn new(code: AuthCode) -> Self {
        AuthBackendError { code, detail: None }
    }

    /// Creates an error with backend-side detail attached
    pub fn with_detail(code: AuthCode, detail: impl Into<String>) -> Self {
        AuthBackendError {
            code,
            detail: Some(detail.into()),
        }
    }
}

/// Full-snapshot feed of one owner's tasks
///
/// Every delivery replaces the previous one; ordering is due date ascending.
pub type TaskFeed = mpsc::UnboundedReceiver<Vec<Task>>;

/// Session transition feed; `None` means signed out
pub type SessionFeed = mpsc::UnboundedReceiver<Option<User>>;

/// Document store for task records
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Fetches the full current task set for one owner, due date ascending
    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>, BackendError>;

    /// Creates a task owned by `user_id`
    ///
    /// The backend assigns the identifier, stamps both timestamps, and starts
    /// the completion flag at false. Returns the stored record.
    async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<Task, BackendError>;

    /// Applies a partial update to one task by identifier
    ///
    /// Only the present patch fields are written; `updatedAt` is refreshed.
    /// Returns the updated record, or `NotFound` if the identifier is
    /// unknown.
    async fn update_task(&self, task_id: &str, patch: TaskPatch) -> Result<Task, BackendError>;

    /// Deletes one task by identifier
    async fn delete_task(&self, task_id: &str) -> Result<(), BackendError>;

    /// Opens a push feed for one owner's tasks
    ///
    /// The current result set is delivered immediately, then again after
    /// every change to the owner's collection.
    async fn watch_tasks(&self, user_id: &str) -> Result<TaskFeed, BackendError>;
}

/// Identity service
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Signs in with email and password
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthBackendError>;

    /// Creates an account and signs it in
    async fn sign_up_with_password(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthBackendError>;

    /// Signs in through the federated identity provider
    ///
    /// The token exchange with the provider happens entirely inside the
    /// collaborator; the client only sees the resulting identity or a
    /// classified failure (`Cancelled`, `CredentialConflict`, ...).
    async fn sign_in_with_provider(&self) -> Result<User, AuthBackendError>;

    /// Ends the current session
    async fn sign_out(&self) -> Result<(), AuthBackendError>;

    /// Opens the session transition feed
    fn watch_session(&self) -> SessionFeed;
}
