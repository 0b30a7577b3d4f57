/// In-memory backend for testing and demos
///
/// Implements both collaborator traits over a mutex-guarded map. It is the
/// reference behavior for the seam and the double every integration test runs
/// against:
///
/// - accounts are keyed by lowercase email; sign-up enforces the same
///   classified failures a hosted identity service would (`EmailInUse`,
///   `InvalidEmail`, `WeakPassword`);
/// - every task mutation pushes a fresh ordered snapshot to all watchers
///   registered for that owner;
/// - failures and latency are injectable so tests can stage error paths and
///   the slow-fetch race deterministically.
///
/// # Example
///
/// ```no_run
/// use tasksync_client::backend::{AuthBackend, MemoryBackend, TaskBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MemoryBackend::new();
///
/// let user = backend
///     .sign_up_with_password("Dana", "dana@example.com", "s3cret-A1")
///     .await?;
/// let tasks = backend.fetch_tasks(&user.id).await?;
/// assert!(tasks.is_empty());
/// # Ok(())
/// # }
/// ```

use crate::backend::backend_trait::{
    AuthBackend, AuthBackendError, BackendError, SessionFeed, TaskBackend, TaskFeed,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tasksync_shared::auth::AuthCode;
use tasksync_shared::models::{Task, TaskDraft, TaskPatch, User};
use tokio::sync::mpsc;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user: User,
    /// None for accounts created through the federated provider
    password: Option<String>,
}

#[derive(Default)]
struct MemoryState {
    /// Accounts keyed by lowercase email
    accounts: HashMap<String, Account>,

    /// Currently signed-in identity
    current_user: Option<User>,

    /// Task records keyed by identifier
    tasks: HashMap<String, Task>,

    /// Registered task watchers: (owner id, sender)
    task_watchers: Vec<(String, mpsc::UnboundedSender<Vec<Task>>)>,

    /// Registered session watchers
    session_watchers: Vec<mpsc::UnboundedSender<Option<User>>>,

    /// Identity the federated provider would hand back, if configured
    provider_identity: Option<ProviderIdentity>,

    /// When set, every task operation fails with `Unavailable`
    fail_task_ops: bool,
}

#[derive(Clone)]
struct ProviderIdentity {
    email: String,
    display_name: Option<String>,
}

/// In-memory implementation of both collaborator traits
pub struct MemoryBackend {
    state: Mutex<MemoryState>,

    /// Artificial latency applied to `fetch_tasks`
    fetch_delay: Duration,
}

impl MemoryBackend {
    /// Creates an empty backend
    pub fn new() -> Self {
        MemoryBackend {
            state: Mutex::new(MemoryState::default()),
            fetch_delay: Duration::ZERO,
        }
    }

    /// Creates a backend whose `fetch_tasks` takes `delay` to answer
    ///
    /// The snapshot is taken when the call starts and delivered when the
    /// delay elapses, which is exactly what makes a slow fetch go stale
    /// against a concurrent feed push.
    pub fn with_fetch_delay(delay: Duration) -> Self {
        MemoryBackend {
            state: Mutex::new(MemoryState::default()),
            fetch_delay: delay,
        }
    }

    /// Configures the identity the federated provider returns
    ///
    /// Without this, provider sign-in fails with `Cancelled` (the flow was
    /// abandoned before producing a token).
    pub fn set_provider_identity(&self, email: &str, display_name: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.provider_identity = Some(ProviderIdentity {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        });
    }

    /// Makes every subsequent task operation fail with `Unavailable`
    pub fn set_fail_task_ops(&self, fail: bool) {
        self.state.lock().unwrap().fail_task_ops = fail;
    }

    /// Invalidates the current session from the backend side
    ///
    /// Session watchers observe the transition; no local sign-out call is
    /// involved.
    pub fn revoke_session(&self) {
        let mut state = self.state.lock().unwrap();
        state.current_user = None;
        notify_session_watchers(&mut state, None);
    }

    fn check_available(state: &MemoryState) -> Result<(), BackendError> {
        if state.fail_task_ops {
            return Err(BackendError::Unavailable(
                "injected backend failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn email_is_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn snapshot_for(state: &MemoryState, user_id: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| task.user_id == user_id)
        .cloned()
        .collect();
    tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));
    tasks
}

fn notify_task_watchers(state: &mut MemoryState, user_id: &str) {
    let snapshot = snapshot_for(state, user_id);
    state
        .task_watchers
        .retain(|(owner, tx)| owner.as_str() != user_id || tx.send(snapshot.clone()).is_ok());
}

fn notify_session_watchers(state: &mut MemoryState, user: Option<User>) {
    state
        .session_watchers
        .retain(|tx| tx.send(user.clone()).is_ok());
}

fn new_user(email: &str, display_name: Option<String>) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        display_name,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl TaskBackend for MemoryBackend {
    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>, BackendError> {
        let snapshot = {
            let state = self.state.lock().unwrap();
            Self::check_available(&state)?;
            snapshot_for(&state, user_id)
        };

        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        Ok(snapshot)
    }

    async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<Task, BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            is_completed: false,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        state.tasks.insert(task.id.clone(), task.clone());
        notify_task_watchers(&mut state, user_id);
        Ok(task)
    }

    async fn update_task(&self, task_id: &str, patch: TaskPatch) -> Result<Task, BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;

        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| BackendError::NotFound(task_id.to_string()))?;

        patch.apply(task);
        task.updated_at = Utc::now();
        let updated = task.clone();

        notify_task_watchers(&mut state, &updated.user_id);
        Ok(updated)
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;

        let task = state
            .tasks
            .remove(task_id)
            .ok_or_else(|| BackendError::NotFound(task_id.to_string()))?;

        notify_task_watchers(&mut state, &task.user_id);
        Ok(())
    }

    async fn watch_tasks(&self, user_id: &str) -> Result<TaskFeed, BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;

        let (tx, rx) = mpsc::unbounded_channel();
        // New watchers see the current result set right away
        let _ = tx.send(snapshot_for(&state, user_id));
        state.task_watchers.push((user_id.to_string(), tx));
        Ok(rx)
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthBackendError> {
        if !email_is_valid(email) {
            return Err(AuthBackendError::new(AuthCode::InvalidEmail));
        }

        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .get(&email.to_lowercase())
            .ok_or_else(|| AuthBackendError::new(AuthCode::UserNotFound))?;

        match &account.password {
            Some(stored) if stored == password => {}
            _ => return Err(AuthBackendError::new(AuthCode::WrongPassword)),
        }

        let user = account.user.clone();
        state.current_user = Some(user.clone());
        notify_session_watchers(&mut state, Some(user.clone()));
        Ok(user)
    }

    async fn sign_up_with_password(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthBackendError> {
        if !email_is_valid(email) {
            return Err(AuthBackendError::new(AuthCode::InvalidEmail));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthBackendError::new(AuthCode::WeakPassword));
        }

        let mut state = self.state.lock().unwrap();
        let key = email.to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(AuthBackendError::new(AuthCode::EmailInUse));
        }

        let display_name = if display_name.is_empty() {
            None
        } else {
            Some(display_name.to_string())
        };
        let user = new_user(email, display_name);

        state.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password: Some(password.to_string()),
            },
        );
        state.current_user = Some(user.clone());
        notify_session_watchers(&mut state, Some(user.clone()));
        Ok(user)
    }

    async fn sign_in_with_provider(&self) -> Result<User, AuthBackendError> {
        let mut state = self.state.lock().unwrap();

        let identity = state
            .provider_identity
            .clone()
            .ok_or_else(|| AuthBackendError::new(AuthCode::Cancelled))?;

        let key = identity.email.to_lowercase();
        let user = match state.accounts.get(&key) {
            // Same email already registered with a password credential
            Some(account) if account.password.is_some() => {
                return Err(AuthBackendError::new(AuthCode::CredentialConflict));
            }
            Some(account) => account.user.clone(),
            None => {
                let user = new_user(&identity.email, identity.display_name.clone());
                state.accounts.insert(
                    key,
                    Account {
                        user: user.clone(),
                        password: None,
                    },
                );
                user
            }
        };

        state.current_user = Some(user.clone());
        notify_session_watchers(&mut state, Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthBackendError> {
        let mut state = self.state.lock().unwrap();
        state.current_user = None;
        notify_session_watchers(&mut state, None);
        Ok(())
    }

    fn watch_session(&self) -> SessionFeed {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().unwrap().session_watchers.push(tx);
        rx
    }
}
