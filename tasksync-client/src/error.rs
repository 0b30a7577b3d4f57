/// Error handling for the client stores
///
/// This module provides the two error types the stores hand to callers. The
/// `Display` text of each variant is the exact user-facing notice the host
/// application shows, so a caller can surface `err.to_string()` directly;
/// the underlying backend failure stays attached as the error source.
///
/// Failures are also recorded into store/session state before they are
/// returned, so a caller that ignores the `Result` still sees the notice on
/// the next state snapshot. Nothing is retried automatically; the user
/// re-triggers the action.

use tasksync_shared::auth::AuthCode;

use crate::backend::{AuthBackendError, BackendError};

/// Task store operation errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Operation requires a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Fetching or subscribing to the task collection failed
    #[error("Failed to load tasks")]
    Load(#[source] BackendError),

    /// Create request was rejected
    #[error("Failed to add task")]
    Create(#[source] BackendError),

    /// Update request was rejected
    #[error("Failed to update task")]
    Update(#[source] BackendError),

    /// Delete request was rejected
    #[error("Failed to delete task")]
    Delete(#[source] BackendError),

    /// Completion toggle was rejected
    #[error("Failed to update task completion")]
    ToggleCompletion(#[source] BackendError),

    /// Draft fields failed validation before anything was sent
    #[error("Invalid task fields")]
    Validation(#[from] validator::ValidationErrors),
}

/// Session operation errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The identity service rejected the attempt; the message comes from the
    /// centralized code table
    #[error("{}", .0.user_message())]
    Rejected(AuthCode),

    /// Sign-out did not complete; the session is left as it was
    #[error("Sign out failed")]
    SignOut(#[source] AuthBackendError),
}

impl AuthError {
    /// The classified failure code, when the backend produced one
    pub fn code(&self) -> Option<AuthCode> {
        match self {
            AuthError::Rejected(code) => Some(*code),
            AuthError::SignOut(source) => Some(source.code),
        }
    }
}

impl From<AuthBackendError> for AuthError {
    fn from(err: AuthBackendError) -> Self {
        AuthError::Rejected(err.code)
    }
}
