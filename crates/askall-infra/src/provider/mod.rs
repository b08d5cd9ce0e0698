//! Concrete provider adapters.
//!
//! [`create_adapter`] builds the right adapter for a provider from the
//! loaded config and its key; [`build_registry`] does so for a whole
//! selection after checking credentials up front.

pub mod gemini;
pub mod openai_compat;
pub mod perplexity;

use secrecy::SecretString;

use askall_core::provider::box_adapter::BoxProviderAdapter;
use askall_core::provider::registry::AdapterRegistry;
use askall_types::config::AppConfig;
use askall_types::error::ConfigError;
use askall_types::provider::Provider;

use self::gemini::GeminiAdapter;
use self::openai_compat::OpenAiCompatAdapter;
use self::openai_compat::config::{cerebras_defaults, chatgpt_defaults};
use self::perplexity::PerplexityAdapter;
use crate::config::Credentials;
use crate::http;

/// Build the adapter for `provider`, applying any config-file overrides.
pub fn create_adapter(
    provider: Provider,
    config: &AppConfig,
    api_key: SecretString,
    client: reqwest::Client,
) -> BoxProviderAdapter {
    let over = config.providers.get(provider);
    match provider {
        Provider::ChatGpt => BoxProviderAdapter::new(OpenAiCompatAdapter::new(
            client,
            api_key,
            chatgpt_defaults().with_override(over),
        )),
        Provider::Cerebras => BoxProviderAdapter::new(OpenAiCompatAdapter::new(
            client,
            api_key,
            cerebras_defaults().with_override(over),
        )),
        Provider::Gemini => BoxProviderAdapter::new(GeminiAdapter::new(client, api_key, over)),
        Provider::Perplexity => {
            BoxProviderAdapter::new(PerplexityAdapter::new(client, api_key, over))
        }
    }
}

/// Build a registry holding one adapter per selected provider.
///
/// Outside mock mode every selected provider must have a key; the first
/// missing one is reported before anything is dispatched.
pub fn build_registry(
    selection: &[Provider],
    config: &AppConfig,
    credentials: &Credentials,
    mock: bool,
) -> Result<AdapterRegistry, ConfigError> {
    if !mock {
        credentials.check(selection)?;
    }

    let client = http::build_client()?;
    let mut registry = AdapterRegistry::new();
    for provider in selection {
        let key = credentials
            .require(*provider)
            .unwrap_or_else(|_| SecretString::from(String::new()));
        registry.register(create_adapter(*provider, config, key, client.clone()));
    }

    tracing::debug!(providers = ?registry.providers(), mock, "adapter registry built");
    Ok(registry)
}
