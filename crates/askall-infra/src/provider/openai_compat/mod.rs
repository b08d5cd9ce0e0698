//! Adapter for vendors speaking the OpenAI chat-completions protocol
//! (ChatGPT and Cerebras).

pub mod config;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use askall_core::provider::adapter::ProviderAdapter;
use askall_core::raw::RawPayload;
use askall_types::error::ProviderError;
use askall_types::provider::Provider;

use self::config::OpenAiCompatConfig;
use crate::http;

/// OpenAI-compatible chat-completions adapter.
///
/// Debug is not derived so the key never reaches a log line.
pub struct OpenAiCompatAdapter {
    client: reqwest::Client,
    api_key: SecretString,
    config: OpenAiCompatConfig,
    fixture: &'static str,
}

impl OpenAiCompatAdapter {
    pub fn new(client: reqwest::Client, api_key: SecretString, config: OpenAiCompatConfig) -> Self {
        let fixture = match config.provider {
            Provider::Cerebras => include_str!("../fixtures/cerebras.json"),
            _ => include_str!("../fixtures/chatgpt.json"),
        };
        Self {
            client,
            api_key,
            config,
            fixture,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Models visible to this key, newest first.
    pub async fn list_models(&self) -> Result<Vec<OpenAiModel>, ProviderError> {
        let request = self
            .client
            .get(self.url("/models"))
            .bearer_auth(self.api_key.expose_secret());
        let body = http::send(request).await?;

        let mut list: ModelList = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Transport(format!("failed to parse model list: {e}")))?;
        list.data.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(list.data)
    }
}

impl ProviderAdapter for OpenAiCompatAdapter {
    fn provider(&self) -> Provider {
        self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn invoke(&self, prompt: &str, mock: bool) -> Result<RawPayload, ProviderError> {
        if mock {
            return Ok(RawPayload::from_body(
                self.config.provider,
                &self.config.model,
                self.fixture,
            ));
        }

        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        let request = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);

        tracing::debug!(provider = %self.config.provider, model = %self.config.model, "sending chat completion");
        let text = http::send(request).await?;
        Ok(RawPayload::from_body(
            self.config.provider,
            &self.config.model,
            &text,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<OpenAiModel>,
}

/// One entry from `GET /models`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenAiModel {
    pub id: String,
    /// Unix seconds.
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub owned_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use askall_core::normalize::normalize;
    use mockito::Matcher;
    use std::time::Duration;

    fn adapter(base_url: &str, config: OpenAiCompatConfig) -> OpenAiCompatAdapter {
        let config = OpenAiCompatConfig {
            base_url: base_url.to_string(),
            ..config
        };
        OpenAiCompatAdapter::new(
            reqwest::Client::new(),
            SecretString::from("sk-test".to_string()),
            config,
        )
    }

    #[tokio::test]
    async fn test_mock_chatgpt_is_deterministic() {
        let adapter = adapter("http://unused.invalid", config::chatgpt_defaults());
        let first = normalize(adapter.invoke("p", true).await.unwrap(), Duration::ZERO);
        let second = normalize(adapter.invoke("p", true).await.unwrap(), Duration::ZERO);
        assert_eq!(first, second);
        assert_eq!(
            first.content,
            "This is a mocked ChatGPT response.\n---\nThis is another mocked ChatGPT response."
        );
        assert_eq!(first.finish_reason, "stop");
        assert_eq!(first.total_tokens, 15);
    }

    #[tokio::test]
    async fn test_mock_cerebras_is_deterministic() {
        let adapter = adapter("http://unused.invalid", config::cerebras_defaults());
        let resp = normalize(adapter.invoke("p", true).await.unwrap(), Duration::ZERO);
        let again = normalize(adapter.invoke("p", true).await.unwrap(), Duration::ZERO);
        assert_eq!(resp, again);
        assert_eq!(resp.provider, Provider::Cerebras);
        assert_eq!(resp.content, "This is a mocked Cerebras response.");
    }

    #[tokio::test]
    async fn test_live_request_shape() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "say \"hi\""}],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"gpt-4o-2024-08-06","choices":[{"index":0,"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}],"usage":{"total_tokens":3}}"#)
            .create_async()
            .await;

        let adapter = adapter(&server.url(), config::chatgpt_defaults());
        let raw = adapter.invoke("say \"hi\"", false).await.unwrap();
        m.assert_async().await;

        let resp = normalize(raw, Duration::ZERO);
        assert_eq!(resp.model_name, "gpt-4o-2024-08-06");
        assert_eq!(resp.content, "hi");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"bad key"}}"#)
            .create_async()
            .await;

        let adapter = adapter(&server.url(), config::cerebras_defaults());
        let err = adapter.invoke("p", false).await.unwrap_err();
        assert!(matches!(err, ProviderError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_list_models_sorted_newest_first() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/models")
            .with_status(200)
            .with_body(r#"{"object":"list","data":[
                {"id":"old","object":"model","created":100,"owned_by":"system"},
                {"id":"new","object":"model","created":300,"owned_by":"openai"},
                {"id":"mid","object":"model","created":200,"owned_by":"system"}
            ]}"#)
            .create_async()
            .await;

        let adapter = adapter(&server.url(), config::chatgpt_defaults());
        let ids: Vec<String> = adapter
            .list_models()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
