//! Perplexity adapter (chat completions with web retrieval).

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use askall_core::provider::adapter::ProviderAdapter;
use askall_core::raw::RawPayload;
use askall_types::config::ProviderOverride;
use askall_types::error::ProviderError;
use askall_types::provider::Provider;

use crate::http;

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_MODEL: &str = "sonar-pro";

const SYSTEM_PROMPT: &str = "Be precise and concise.";
const MOCK_FIXTURE: &str = include_str!("fixtures/perplexity.json");

pub struct PerplexityAdapter {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl PerplexityAdapter {
    pub fn new(client: reqwest::Client, api_key: SecretString, over: &ProviderOverride) -> Self {
        Self {
            client,
            api_key,
            base_url: over
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: over.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "max_tokens": 4000,
            "temperature": 0.2,
            "top_p": 0.9,
            "search_domain_filter": [],
            "return_images": false,
            "return_related_questions": false,
            "search_recency_filter": "month",
            "top_k": 0,
            "stream": false,
            "presence_penalty": 0,
            "frequency_penalty": 1,
            "web_search_options": {"search_context_size": "high"},
        })
    }
}

impl ProviderAdapter for PerplexityAdapter {
    fn provider(&self) -> Provider {
        Provider::Perplexity
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str, mock: bool) -> Result<RawPayload, ProviderError> {
        if mock {
            return Ok(RawPayload::from_body(
                Provider::Perplexity,
                &self.model,
                MOCK_FIXTURE,
            ));
        }

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.payload(prompt));

        tracing::debug!(model = %self.model, "sending perplexity completion");
        let text = http::send(request).await?;
        Ok(RawPayload::from_body(Provider::Perplexity, &self.model, &text))
    }
}
