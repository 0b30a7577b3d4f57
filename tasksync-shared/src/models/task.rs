/// Task model and input types
///
/// This module provides the Task record mirrored from the backend collection,
/// plus the two input shapes the client sends back: a full draft for creation
/// and an all-optional patch for partial updates.
///
/// # Record Layout
///
/// The backend stores task documents with these fields (camelCase is the wire
/// contract):
///
/// ```json
/// {
///   "id": "7f3b...",
///   "title": "Renew passport",
///   "description": "",
///   "dueDate": "2024-03-01T09:00:00Z",
///   "priority": "high",
///   "isCompleted": false,
///   "userId": "a91c...",
///   "createdAt": "2024-02-10T18:22:31Z",
///   "updatedAt": "2024-02-10T18:22:31Z"
/// }
/// ```
///
/// Identifiers are opaque strings assigned by the backend. `id` and `userId`
/// never change after creation; `updatedAt` is refreshed by the backend on
/// every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,

    /// Medium priority.
    Medium,

    /// High priority.
    High,
}

impl TaskPriority {
    /// Converts the priority to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record as held in the store cache and returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the backend
    pub id: String,

    /// Title (non-empty)
    pub title: String,

    /// Free-form description, may be empty
    pub description: String,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// Priority level
    pub priority: TaskPriority,

    /// Completion flag
    pub is_completed: bool,

    /// Identifier of the owning user, immutable after creation
    pub user_id: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated; monotonically non-decreasing
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// Completion always starts out false; the backend assigns the identifier and
/// both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Title, 1 to 200 characters
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Description, up to 2000 characters (may be empty)
    #[validate(length(max = 2000))]
    pub description: String,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// Priority level
    pub priority: TaskPriority,
}

/// Partial update for a task
///
/// Only the fields that are present are written; everything else is left
/// untouched. The identifier, owner, and creation timestamp are not part of
/// the patch and therefore cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// Creates a patch that only changes the completion flag
    pub fn completion(done: bool) -> Self {
        TaskPatch {
            is_completed: Some(done),
            ..TaskPatch::default()
        }
    }

    /// Returns true when the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.is_completed.is_none()
    }

    /// Writes the present fields onto `task`
    ///
    /// The caller is responsible for refreshing `updated_at`; this method only
    /// touches the patchable fields.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            due_date: Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
            priority: TaskPriority::Medium,
            is_completed: false,
            user_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_task_wire_field_names() {
        let json = serde_json::to_value(sample_task()).unwrap();

        assert!(json.get("dueDate").is_some());
        assert!(json.get("isCompleted").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["priority"], "medium");
    }

    #[test]
    fn test_task_roundtrip() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_draft_validation() {
        let valid = TaskDraft {
            title: "Buy groceries".to_string(),
            description: String::new(),
            due_date: Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap(),
            priority: TaskPriority::Low,
        };
        assert!(valid.validate().is_ok());

        let empty_title = TaskDraft {
            title: String::new(),
            ..valid.clone()
        };
        assert!(empty_title.validate().is_err());

        let oversized_title = TaskDraft {
            title: "x".repeat(201),
            ..valid
        };
        assert!(oversized_title.validate().is_err());
    }

    #[test]
    fn test_patch_default_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completion(true).is_empty());
    }

    #[test]
    fn test_patch_completion() {
        let patch = TaskPatch::completion(true);
        assert_eq!(patch.is_completed, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.due_date.is_none());
    }

    #[test]
    fn test_patch_apply_changes_only_present_fields() {
        let mut task = sample_task();
        let patch = TaskPatch {
            title: Some("Write final report".to_string()),
            is_completed: Some(true),
            ..TaskPatch::default()
        };

        patch.apply(&mut task);

        assert_eq!(task.title, "Write final report");
        assert!(task.is_completed);
        // Untouched fields keep their values
        assert_eq!(task.description, "Quarterly numbers");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.id, "t1");
        assert_eq!(task.user_id, "u1");
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_patch_skips_absent_fields_on_wire() {
        let json = serde_json::to_value(TaskPatch::completion(false)).unwrap();
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("title").is_none());
        assert!(json.get("dueDate").is_none());
    }
}
