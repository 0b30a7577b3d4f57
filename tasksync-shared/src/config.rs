/// Configuration management for the tasksync client
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct for the backend collaborator.
///
/// # Environment Variables
///
/// - `TASKSYNC_PROJECT_ID`: Backend project identifier (required)
/// - `TASKSYNC_API_KEY`: Backend API key (required)
/// - `TASKSYNC_TASK_COLLECTION`: Task collection name (default: tasks)
///
/// # Example
///
/// ```no_run
/// use tasksync_shared::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Task collection: {}", config.backend.collection_path());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend collaborator configuration
    pub backend: BackendConfig,
}

/// Backend collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend project identifier
    pub project_id: String,

    /// API key presented to the backend
    ///
    /// Scoped per project; rotate it from the backend console, never commit it.
    pub api_key: String,

    /// Name of the task collection
    pub task_collection: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing or
    /// empty.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let project_id = env::var("TASKSYNC_PROJECT_ID")
            .map_err(|_| anyhow::anyhow!("TASKSYNC_PROJECT_ID environment variable is required"))?;

        let api_key = env::var("TASKSYNC_API_KEY")
            .map_err(|_| anyhow::anyhow!("TASKSYNC_API_KEY environment variable is required"))?;

        if api_key.is_empty() {
            anyhow::bail!("TASKSYNC_API_KEY must not be empty");
        }

        let task_collection =
            env::var("TASKSYNC_TASK_COLLECTION").unwrap_or_else(|_| "tasks".to_string());

        Ok(Self {
            backend: BackendConfig {
                project_id,
                api_key,
                task_collection,
            },
        })
    }
}

impl BackendConfig {
    /// Returns the fully qualified collection path
    pub fn collection_path(&self) -> String {
        format!("projects/{}/{}", self.project_id, self.task_collection)
    }
}
