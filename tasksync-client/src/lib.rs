//! # Tasksync Client Library
//!
//! Client-side state layer for the tasksync task manager: an authenticated
//! session, a task store that mirrors the user's backend collection in real
//! time, and the collaborator traits the stores are written against.
//!
//! ## Module Organization
//!
//! - `backend`: Backend collaborator traits and the in-memory implementation
//! - `store`: Task store with live sync and the filtered view
//! - `session`: Authenticated session state
//! - `context`: Application context owning the stores
//! - `error`: Store and session error types
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasksync_client::backend::MemoryBackend;
//! use tasksync_client::AppContext;
//! use tasksync_shared::config::{BackendConfig, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryBackend::new());
//! let config = Config {
//!     backend: BackendConfig {
//!         project_id: "demo".to_string(),
//!         api_key: "local".to_string(),
//!         task_collection: "tasks".to_string(),
//!     },
//! };
//!
//! let app = AppContext::new(config, backend.clone(), backend);
//! app.session()
//!     .sign_up_with_password("Dana", "dana@example.com", "s3cret-A1")
//!     .await?;
//!
//! // Live subscription: every backend change replaces the cached collection.
//! let subscription = app.tasks().subscribe().await?;
//! # let _ = subscription;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod context;
pub mod error;
pub mod session;
pub mod store;

pub use context::AppContext;
pub use error::{AuthError, StoreError};
pub use session::{AuthSession, SessionState};
pub use store::{StorePhase, Subscription, TaskListState, TaskStore};
