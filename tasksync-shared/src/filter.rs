/// Filter criteria and the derived task view
///
/// The store caches the full task collection for the signed-in user and shows
/// a derived view: tasks matching the current criteria, ordered by due date
/// ascending. This module holds the criteria types and the pure derivation.
///
/// Both selectors are explicit optionals; an unset selector matches
/// everything. The derivation is deterministic and idempotent, and the sort
/// is stable, so tasks with equal due dates keep their input order.
///
/// # Example
///
/// ```
/// use tasksync_shared::filter::{CompletionFilter, TaskFilter};
/// use tasksync_shared::models::TaskPriority;
///
/// let filter = TaskFilter {
///     priority: Some(TaskPriority::High),
///     status: Some(CompletionFilter::Incomplete),
/// };
/// assert!(!filter.is_empty());
/// assert!(TaskFilter::default().is_empty());
/// ```

use crate::models::{Task, TaskPriority};
use serde::{Deserialize, Serialize};

/// Completion-status selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    /// Only completed tasks
    Completed,

    /// Only tasks still open
    Incomplete,
}

impl CompletionFilter {
    /// Checks whether a completion flag satisfies this selector
    pub fn matches(&self, is_completed: bool) -> bool {
        match self {
            CompletionFilter::Completed => is_completed,
            CompletionFilter::Incomplete => !is_completed,
        }
    }
}

/// Criteria for the derived task view
///
/// Transient state; never persisted. The default has both selectors unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Keep only tasks with this priority
    pub priority: Option<TaskPriority>,

    /// Keep only tasks with this completion status
    pub status: Option<CompletionFilter>,
}

impl TaskFilter {
    /// Returns true when both selectors are unset
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.status.is_none()
    }

    /// Checks whether a task passes both selectors
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            if !status.matches(task.is_completed) {
                return false;
            }
        }
        true
    }
}

/// Computes the derived view: matching tasks ordered by due date ascending
///
/// Pure function over the cached collection; applying it twice with the same
/// criteria yields the same sequence. `sort_by_key` is stable, so equal due
/// dates preserve input order.
pub fn apply_filters(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();
    visible.sort_by_key(|task| task.due_date);
    visible
}
