/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for the store and session
/// suites: an app context wired to a fresh in-memory backend, a canned
/// test account, and a polling helper for asynchronous state changes.

use std::sync::Arc;
use std::time::Duration;

use tasksync_client::backend::MemoryBackend;
use tasksync_client::AppContext;
use tasksync_shared::config::{BackendConfig, Config};
use tasksync_shared::models::User;

pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "Sup3r-secret";

/// Test context wiring an app context to a fresh in-memory backend
pub struct TestContext {
    pub backend: Arc<MemoryBackend>,
    pub app: AppContext,
}

impl TestContext {
    /// Creates a context with a default backend
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Creates a context around a preconfigured backend
    pub fn with_backend(backend: MemoryBackend) -> Self {
        init_tracing();
        let backend = Arc::new(backend);
        let app = AppContext::new(test_config(), backend.clone(), backend.clone());
        TestContext { backend, app }
    }

    /// Registers and signs in the canned test account
    pub async fn sign_in(&self) -> User {
        self.app
            .session()
            .sign_up_with_password("Test User", TEST_EMAIL, TEST_PASSWORD)
            .await
            .expect("test account sign-up should succeed")
    }
}

pub fn test_config() -> Config {
    Config {
        backend: BackendConfig {
            project_id: "test".to_string(),
            api_key: "local-test-key".to_string(),
            task_collection: "tasks".to_string(),
        },
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Polls `condition` until it holds or `secs` seconds elapse
///
/// Conditions are synchronous state probes; the store and session publish
/// cloneable snapshots, so there is nothing to await in the check itself.
pub async fn wait_for<F>(mut condition: F, secs: u64) -> Result<(), String>
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(secs);
    loop {
        if condition() {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(format!("condition not met within {}s", secs));
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
