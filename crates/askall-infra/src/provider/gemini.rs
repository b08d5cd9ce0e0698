//! Gemini adapter over the `generateContent` REST endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use askall_core::provider::adapter::ProviderAdapter;
use askall_core::raw::RawPayload;
use askall_types::config::ProviderOverride;
use askall_types::error::ProviderError;
use askall_types::provider::Provider;

use crate::http;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-pro-exp-02-05";

const MOCK_FIXTURE: &str = include_str!("fixtures/gemini.json");

pub struct GeminiAdapter {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    /// Full resource name, e.g. `models/gemini-2.0-pro-exp-02-05`.
    model: String,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, api_key: SecretString, over: &ProviderOverride) -> Self {
        let model = over.model.as_deref().unwrap_or(DEFAULT_MODEL);
        Self {
            client,
            api_key,
            base_url: over
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: if model.starts_with("models/") {
                model.to_string()
            } else {
                format!("models/{model}")
            },
        }
    }

    /// Models that support `generateContent`, following pagination.
    pub async fn list_models(&self) -> Result<Vec<GeminiModel>, ProviderError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/models", self.base_url))
                .header("x-goog-api-key", self.api_key.expose_secret())
                .query(&[("pageSize", "1000")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let body = http::send(request).await?;
            let page: ModelPage = serde_json::from_str(&body).map_err(|e| {
                ProviderError::Transport(format!("failed to parse model list: {e}"))
            })?;

            models.extend(
                page.models
                    .into_iter()
                    .filter(|m| m.supports("generateContent")),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str, mock: bool) -> Result<RawPayload, ProviderError> {
        if mock {
            return Ok(RawPayload::from_body(Provider::Gemini, &self.model, MOCK_FIXTURE));
        }

        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
        });
        let request = self
            .client
            .post(format!("{}/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body);

        tracing::debug!(model = %self.model, "sending generateContent");
        let text = http::send(request).await?;
        Ok(RawPayload::from_body(Provider::Gemini, &self.model, &text))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelPage {
    #[serde(default)]
    models: Vec<GeminiModel>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// One entry from `GET /models`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiModel {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl GeminiModel {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }
}
