//! Startup state shared by the command handlers.

use std::path::PathBuf;

use askall_infra::config::{Credentials, load_app_config, resolve_config_dir, resolve_log_path};
use askall_infra::log::JsonlInteractionLog;
use askall_types::config::AppConfig;
use askall_types::error::LogError;

/// Configuration and credentials, loaded once per process.
pub struct AppState {
    pub config_dir: PathBuf,
    pub config: AppConfig,
    pub credentials: Credentials,
}

impl AppState {
    pub async fn init() -> Self {
        let config_dir = resolve_config_dir();
        let config = load_app_config(&config_dir).await;
        let credentials = Credentials::from_env();
        tracing::debug!(config_dir = %config_dir.display(), ?credentials, "state initialized");

        Self {
            config_dir,
            config,
            credentials,
        }
    }

    pub fn log_path(&self) -> Result<PathBuf, LogError> {
        resolve_log_path(&self.config)
    }

    pub fn interaction_log(&self) -> Result<JsonlInteractionLog, LogError> {
        Ok(JsonlInteractionLog::new(self.log_path()?))
    }
}
