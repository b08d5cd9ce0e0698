//! Vendor-specific raw response payloads.
//!
//! Adapters return a [`RawPayload`]; the normalizer turns it into a
//! canonical `ModelResponse` immediately, so nothing past the adapter
//! boundary branches on vendor shape.

pub mod chat_completion;
pub mod gemini;
pub mod perplexity;

use askall_types::provider::Provider;

use self::chat_completion::ChatCompletion;
use self::gemini::GenerateContentResponse;
use self::perplexity::PerplexityResponse;

/// A raw response as returned by one vendor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// OpenAI chat-completions shape (ChatGPT, Cerebras).
    ChatCompletion {
        provider: Provider,
        body: ChatCompletion,
    },
    /// Gemini `generateContent` response. The body does not echo the
    /// requested model, so the adapter supplies it.
    Gemini {
        model: String,
        body: GenerateContentResponse,
    },
    /// Perplexity chat completion with retrieval citations.
    Perplexity { body: PerplexityResponse },
    /// A body that did not parse as the vendor's documented shape.
    Malformed {
        provider: Provider,
        model: String,
        reason: String,
    },
}

impl RawPayload {
    /// Parse a vendor response body into the matching variant.
    ///
    /// `model` is the model that was requested; it is used for Gemini and
    /// for the malformed case, where the body cannot tell us.
    pub fn from_body(provider: Provider, model: &str, body: &str) -> Self {
        let parsed = match provider {
            Provider::ChatGpt | Provider::Cerebras => serde_json::from_str(body)
                .map(|body| RawPayload::ChatCompletion { provider, body }),
            Provider::Gemini => serde_json::from_str(body).map(|body| RawPayload::Gemini {
                model: model.to_string(),
                body,
            }),
            Provider::Perplexity => {
                serde_json::from_str(body).map(|body| RawPayload::Perplexity { body })
            }
        };

        parsed.unwrap_or_else(|e| RawPayload::Malformed {
            provider,
            model: model.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            RawPayload::ChatCompletion { provider, .. } => *provider,
            RawPayload::Gemini { .. } => Provider::Gemini,
            RawPayload::Perplexity { .. } => Provider::Perplexity,
            RawPayload::Malformed { provider, .. } => *provider,
        }
    }

    /// Model identifier reported by (or requested from) the vendor.
    pub fn model_name(&self) -> &str {
        match self {
            RawPayload::ChatCompletion { body, .. } => &body.model,
            RawPayload::Gemini { model, .. } => model,
            RawPayload::Perplexity { body } => &body.model,
            RawPayload::Malformed { model, .. } => model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_chat_completion() {
        let body = r#"{"id":"x","model":"gpt-4o","choices":[{"index":0,"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}]}"#;
        let raw = RawPayload::from_body(Provider::ChatGpt, "gpt-4o", body);
        assert!(matches!(raw, RawPayload::ChatCompletion { provider: Provider::ChatGpt, .. }));
        assert_eq!(raw.model_name(), "gpt-4o");
    }

    #[test]
    fn test_from_body_gemini_uses_requested_model() {
        let body = r#"{"candidates":[]}"#;
        let raw = RawPayload::from_body(Provider::Gemini, "models/gemini-test", body);
        assert_eq!(raw.provider(), Provider::Gemini);
        assert_eq!(raw.model_name(), "models/gemini-test");
    }

    #[test]
    fn test_from_body_malformed() {
        let raw = RawPayload::from_body(Provider::Perplexity, "sonar-pro", "<html>502</html>");
        match raw {
            RawPayload::Malformed {
                provider, model, ..
            } => {
                assert_eq!(provider, Provider::Perplexity);
                assert_eq!(model, "sonar-pro");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
