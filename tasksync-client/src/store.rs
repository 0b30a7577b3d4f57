/// Task store with live sync and the filtered view
///
/// The store keeps the authoritative cached copy of the signed-in user's
/// tasks, mirrors the backend collection through a push feed, and derives
/// the visible list from the current filter criteria. State is published
/// through a `tokio::sync::watch` channel; the host application holds a
/// receiver and re-renders on every change.
///
/// # Snapshot Replacement
///
/// Both explicit loads and feed deliveries replace the cached collection
/// wholesale; nothing is merged. Applied replacements are counted by a
/// monotonic revision, and a `load` result is discarded when a feed delivery
/// landed while the fetch was in flight, so a slow fetch can never clobber
/// fresher data.
///
/// # State Machine
///
/// ```text
/// Unloaded → Loading → Loaded    (load success, and every feed delivery)
///                    → Error     (failure; cached data stays as it was)
/// ```
///
/// There is no terminal state; the store lives for the session.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasksync_client::backend::MemoryBackend;
/// use tasksync_client::session::AuthSession;
/// use tasksync_client::store::TaskStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = Arc::new(MemoryBackend::new());
/// let session = AuthSession::new(backend.clone());
/// session
///     .sign_up_with_password("Dana", "dana@example.com", "s3cret-A1")
///     .await?;
///
/// let store = TaskStore::new(backend, session);
/// store.load().await?;
///
/// let subscription = store.subscribe().await?;
/// // ... later
/// subscription.cancel();
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;
use tasksync_shared::filter::{apply_filters, CompletionFilter, TaskFilter};
use tasksync_shared::models::{Task, TaskDraft, TaskPatch, TaskPriority};
use tokio::sync::watch;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::backend::TaskBackend;
use crate::error::StoreError;
use crate::session::AuthSession;

/// Load phase of the task store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorePhase {
    /// Nothing fetched yet
    #[default]
    Unloaded,

    /// A load is in flight
    Loading,

    /// Cache holds the last applied snapshot
    Loaded,

    /// The last load failed; cached data is whatever was applied before
    Error,
}

/// Published snapshot of the task store
#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    /// Cached authoritative copy of the user's tasks
    pub tasks: Vec<Task>,

    /// Derived view: tasks matching the filter, due date ascending
    pub visible: Vec<Task>,

    /// Current filter criteria
    pub filter: TaskFilter,

    /// Load phase
    pub phase: StorePhase,

    /// Most recent user-facing failure notice
    pub error: Option<String>,

    revision: u64,
}

impl TaskListState {
    /// Count of applied snapshot replacements; newer snapshots are larger
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

struct StoreShared {
    backend: Arc<dyn TaskBackend>,
    session: AuthSession,
    state: watch::Sender<TaskListState>,
}

/// Task store handle
///
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct TaskStore {
    shared: Arc<StoreShared>,
}

/// Cancellation handle for a live subscription
///
/// `cancel` detaches the feed consumer; deliveries after that point are
/// ignored and nothing else changes. Dropping the handle without cancelling
/// leaves the subscription running until the backend closes the feed.
#[derive(Debug)]
pub struct Subscription {
    token: CancellationToken,
}

impl Subscription {
    /// Detaches the subscription
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl TaskStore {
    /// Creates a store scoped to the session's signed-in user
    pub fn new(backend: Arc<dyn TaskBackend>, session: AuthSession) -> Self {
        let (state, _) = watch::channel(TaskListState::default());
        TaskStore {
            shared: Arc::new(StoreShared {
                backend,
                session,
                state,
            }),
        }
    }

    /// Snapshot of the current store state
    pub fn state(&self) -> TaskListState {
        self.shared.state.borrow().clone()
    }

    /// Receiver observing every store state change
    pub fn watch(&self) -> watch::Receiver<TaskListState> {
        self.shared.state.subscribe()
    }

    /// Fetches the full current task set and replaces the cache
    ///
    /// The result is discarded if a feed delivery applied while the fetch was
    /// in flight; the delivery is the fresher snapshot. On failure the cache
    /// is left untouched and the notice is recorded.
    pub async fn load(&self) -> Result<(), StoreError> {
        let user_id = self.owner()?;

        let started_revision = self.shared.state.borrow().revision;
        self.shared.state.send_modify(|s| {
            s.phase = StorePhase::Loading;
            s.error = None;
        });

        match self.shared.backend.fetch_tasks(&user_id).await {
            Ok(tasks) => {
                let mut applied = false;
                self.shared.state.send_modify(|s| {
                    if s.revision != started_revision {
                        return;
                    }
                    s.revision += 1;
                    s.tasks = tasks;
                    s.visible = apply_filters(&s.tasks, &s.filter);
                    s.phase = StorePhase::Loaded;
                    s.error = None;
                    applied = true;
                });
                if !applied {
                    tracing::debug!(started_revision, "discarding stale load result");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tasks");
                let err = StoreError::Load(err);
                self.shared.state.send_modify(|s| {
                    s.phase = StorePhase::Error;
                    s.error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Opens a live subscription to the user's tasks
    ///
    /// Every delivery replaces the cached collection and recomputes the
    /// view. Returns the cancellation handle.
    pub async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let user_id = self.owner()?;

        let feed = match self.shared.backend.watch_tasks(&user_id).await {
            Ok(feed) => feed,
            Err(err) => {
                tracing::warn!(error = %err, "failed to open task subscription");
                let err = StoreError::Load(err);
                self.record_error(err.to_string());
                return Err(err);
            }
        };

        let token = CancellationToken::new();
        let consumer_token = token.clone();
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let mut feed = UnboundedReceiverStream::new(feed);
            loop {
                tokio::select! {
                    _ = consumer_token.cancelled() => {
                        tracing::debug!("task subscription cancelled");
                        break;
                    }
                    delivery = feed.next() => match delivery {
                        Some(tasks) => {
                            shared.state.send_modify(|s| {
                                s.revision += 1;
                                s.tasks = tasks;
                                s.visible = apply_filters(&s.tasks, &s.filter);
                                s.phase = StorePhase::Loaded;
                                s.error = None;
                            });
                        }
                        None => {
                            tracing::debug!("task feed closed by backend");
                            break;
                        }
                    }
                }
            }
        });

        Ok(Subscription { token })
    }

    /// Sends a create request for the signed-in user
    ///
    /// The cache is not updated optimistically; the new task shows up through
    /// the subscription feed or the next load. Returns the stored record.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let user_id = self.owner()?;

        if let Err(err) = draft.validate() {
            let err = StoreError::from(err);
            self.record_error(err.to_string());
            return Err(err);
        }

        match self.shared.backend.create_task(&user_id, draft).await {
            Ok(task) => {
                tracing::debug!(task_id = %task.id, "task created");
                Ok(task)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create task");
                let err = StoreError::Create(err);
                self.record_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies a partial update to one task by identifier
    ///
    /// No client-side existence check; the backend is authoritative.
    pub async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<(), StoreError> {
        match self.shared.backend.update_task(task_id, patch).await {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, task_id, "failed to update task");
                let err = StoreError::Update(err);
                self.record_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Deletes one task by identifier
    ///
    /// No optimistic removal; the cache follows the feed or the next load.
    pub async fn delete(&self, task_id: &str) -> Result<(), StoreError> {
        match self.shared.backend.delete_task(task_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, task_id, "failed to delete task");
                let err = StoreError::Delete(err);
                self.record_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Sets the completion flag on one task
    ///
    /// The common-case shortcut for `update`. Failures are recorded into
    /// store state but not returned; the caller has nothing to roll back.
    pub async fn toggle_completion(&self, task_id: &str, done: bool) {
        if let Err(err) = self
            .shared
            .backend
            .update_task(task_id, TaskPatch::completion(done))
            .await
        {
            tracing::warn!(error = %err, task_id, "failed to update task completion");
            let err = StoreError::ToggleCompletion(err);
            self.record_error(err.to_string());
        }
    }

    /// Replaces the filter criteria and recomputes the view
    pub fn set_filter(&self, filter: TaskFilter) {
        self.shared.state.send_modify(|s| {
            s.filter = filter;
            s.visible = apply_filters(&s.tasks, &s.filter);
        });
    }

    /// Sets or clears the priority selector
    pub fn set_priority(&self, priority: Option<TaskPriority>) {
        self.shared.state.send_modify(|s| {
            s.filter.priority = priority;
            s.visible = apply_filters(&s.tasks, &s.filter);
        });
    }

    /// Sets or clears the completion-status selector
    pub fn set_status(&self, status: Option<CompletionFilter>) {
        self.shared.state.send_modify(|s| {
            s.filter.status = status;
            s.visible = apply_filters(&s.tasks, &s.filter);
        });
    }

    /// Resets both selectors and recomputes the view
    pub fn clear_filters(&self) {
        self.set_filter(TaskFilter::default());
    }

    /// Clears the recorded failure notice
    pub fn clear_error(&self) {
        self.shared.state.send_modify(|s| s.error = None);
    }

    fn owner(&self) -> Result<String, StoreError> {
        match self.shared.session.current_user() {
            Some(user) => Ok(user.id),
            None => {
                let err = StoreError::NotSignedIn;
                self.record_error(err.to_string());
                Err(err)
            }
        }
    }

    fn record_error(&self, message: String) {
        self.shared.state.send_modify(|s| s.error = Some(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = TaskListState::default();
        assert_eq!(state.phase, StorePhase::Unloaded);
        assert!(state.tasks.is_empty());
        assert!(state.visible.is_empty());
        assert!(state.filter.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_subscription_cancel_flag() {
        let subscription = Subscription {
            token: CancellationToken::new(),
        };
        assert!(!subscription.is_cancelled());
        subscription.cancel();
        assert!(subscription.is_cancelled());
    }
}
