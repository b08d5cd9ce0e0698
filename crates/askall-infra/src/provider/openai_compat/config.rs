//! Per-provider defaults for the OpenAI chat-completions protocol.

use askall_types::config::ProviderOverride;
use askall_types::provider::Provider;

/// Endpoint and model for an OpenAI-compatible provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCompatConfig {
    pub provider: Provider,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Apply model and base URL overrides from the config file.
    pub fn with_override(mut self, over: &ProviderOverride) -> Self {
        if let Some(model) = &over.model {
            self.model = model.clone();
        }
        if let Some(base_url) = &over.base_url {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        self
    }
}

/// OpenAI: `https://api.openai.com/v1`, `gpt-4o`.
pub fn chatgpt_defaults() -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider: Provider::ChatGpt,
        base_url: "https://api.openai.com/v1".into(),
        model: "gpt-4o".into(),
    }
}

/// Cerebras: `https://api.cerebras.ai/v1`, Llama 4 Scout.
pub fn cerebras_defaults() -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider: Provider::Cerebras,
        base_url: "https://api.cerebras.ai/v1".into(),
        model: "llama-4-scout-17b-16e-instruct".into(),
    }
}
