/// Backend collaborator seam
///
/// The stores talk to the backend through two traits: `TaskBackend` for the
/// document collection (query, mutate, subscribe) and `AuthBackend` for the
/// identity service. The backend itself is opaque and replaceable; this
/// module also ships `MemoryBackend`, an in-process implementation of both
/// traits used as the reference behavior and as the test double.
///
/// # Contract
///
/// - Task queries and feed deliveries always carry the **full** result set
///   for one owner, ordered by due date ascending; deltas are never sent.
/// - Identifiers are opaque strings minted by the backend.
/// - `updatedAt` is stamped by the backend on every mutation.

pub mod backend_trait;
pub mod memory;

// Re-export main types
pub use backend_trait::{
    AuthBackend, AuthBackendError, BackendError, SessionFeed, TaskBackend, TaskFeed,
};
pub use memory::MemoryBackend;
