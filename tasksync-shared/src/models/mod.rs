/// Data models for the tasksync domain
///
/// This module provides the records exchanged with the backend collaborator:
/// tasks with their create/update input types, and the authenticated user.
///
/// All records serialize with the backend's camelCase field names
/// (`dueDate`, `isCompleted`, `userId`, ...), which is the wire contract the
/// rest of the client depends on.

pub mod task;
pub mod user;

// Re-export common types
pub use task::{Task, TaskDraft, TaskPatch, TaskPriority};
pub use user::User;
