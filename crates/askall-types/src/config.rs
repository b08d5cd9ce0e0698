//! Configuration types for askall.
//!
//! [`AppConfig`] mirrors the optional `config.toml` in the config directory.
//! [`RunOptions`] is the run-scoped configuration threaded through dispatch
//! and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::provider::Provider;

/// Top-level configuration, loaded once at startup.
///
/// Every field is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Override for the interaction log location.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Per-provider model and endpoint overrides.
    #[serde(default)]
    pub providers: ProviderOverrides,
}

/// Overrides keyed by provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOverrides {
    #[serde(default)]
    pub chatgpt: ProviderOverride,
    #[serde(default)]
    pub gemini: ProviderOverride,
    #[serde(default)]
    pub perplexity: ProviderOverride,
    #[serde(default)]
    pub cerebras: ProviderOverride,
}

impl ProviderOverrides {
    pub fn get(&self, provider: Provider) -> &ProviderOverride {
        match provider {
            Provider::ChatGpt => &self.chatgpt,
            Provider::Gemini => &self.gemini,
            Provider::Perplexity => &self.perplexity,
            Provider::Cerebras => &self.cerebras,
        }
    }
}

/// Model and base URL override for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOverride {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Options scoped to a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Use canned fixtures instead of the network.
    pub mock: bool,
    /// Append each completed call to the interaction log.
    pub log_interactions: bool,
    /// Raw output only; also disables logging.
    pub quiet: bool,
}

impl RunOptions {
    /// Logging is opt-in and always off in quiet mode.
    pub fn logging_enabled(&self) -> bool {
        self.log_interactions && !self.quiet
    }
}
