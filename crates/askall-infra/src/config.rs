//! Startup configuration: config file, credentials, and log location.
//!
//! Everything here is read once in `main` and passed down explicitly.
//! Adapters never consult the environment themselves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use askall_types::config::AppConfig;
use askall_types::error::{ConfigError, LogError};
use askall_types::provider::Provider;

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ASKALL_CONFIG_DIR";

/// Overrides the interaction log location.
pub const LOG_FILE_ENV: &str = "ASKALL_LOG_FILE";

/// Log file name under the home directory.
pub const DEFAULT_LOG_FILE: &str = "askall_logs.jsonl";

/// Resolve the config directory: `$ASKALL_CONFIG_DIR`, else `~/.askall`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".askall");
    }

    PathBuf::from(".askall")
}

/// Load `{config_dir}/config.toml`.
///
/// - missing file: defaults
/// - unreadable or malformed file: defaults, with a warning
pub async fn load_app_config(config_dir: &Path) -> AppConfig {
    let config_path = config_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "no config.toml, using defaults");
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(path = %config_path.display(), error = %err, "failed to read config, using defaults");
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %config_path.display(), error = %err, "failed to parse config, using defaults");
            AppConfig::default()
        }
    }
}

/// Interaction log path: `$ASKALL_LOG_FILE`, then `log_path` from the
/// config file, then `~/askall_logs.jsonl`.
pub fn resolve_log_path(config: &AppConfig) -> Result<PathBuf, LogError> {
    log_path_from(
        std::env::var(LOG_FILE_ENV).ok(),
        config,
        dirs::home_dir(),
    )
}

fn log_path_from(
    env: Option<String>,
    config: &AppConfig,
    home: Option<PathBuf>,
) -> Result<PathBuf, LogError> {
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &config.log_path {
        return Ok(path.clone());
    }
    home.map(|h| h.join(DEFAULT_LOG_FILE))
        .ok_or(LogError::HomeDirUnavailable)
}

/// API keys for each provider, read once at startup.
#[derive(Default)]
pub struct Credentials {
    keys: BTreeMap<Provider, SecretString>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let keys = Provider::ALL
            .into_iter()
            .filter_map(|p| {
                lookup(p.env_var())
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (p, SecretString::from(v)))
            })
            .collect();
        Self { keys }
    }

    pub fn is_set(&self, provider: Provider) -> bool {
        self.keys.contains_key(&provider)
    }

    /// The key for `provider`, or a `MissingCredential` error naming its variable.
    pub fn require(&self, provider: Provider) -> Result<SecretString, ConfigError> {
        self.keys
            .get(&provider)
            .map(|key| SecretString::from(key.expose_secret().to_string()))
            .ok_or(ConfigError::MissingCredential {
                provider,
                env_var: provider.env_var(),
            })
    }

    /// Check every provider in `selection` has a key.
    pub fn check(&self, selection: &[Provider]) -> Result<(), ConfigError> {
        for provider in selection {
            self.require(*provider)?;
        }
        Ok(())
    }

    /// First four characters of the key; the rest is elided.
    pub fn masked(&self, provider: Provider) -> Option<String> {
        self.keys.get(&provider).map(|key| {
            let prefix: String = key.expose_secret().chars().take(4).collect();
            format!("{prefix}...")
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("set", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}
