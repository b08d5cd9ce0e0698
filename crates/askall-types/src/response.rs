//! Canonical, provider-agnostic response record.

use serde::{Deserialize, Serialize};

use crate::provider::Provider;

/// Content substituted when a vendor returns no usable candidate.
pub const EMPTY_RESPONSE_MARKER: &str = "Received an empty response.";

/// Finish reason used by chat-completion vendors when none was reported.
pub const FINISH_REASON_NOT_AVAILABLE: &str = "N/A";

/// Finish reason used by Gemini when none was reported.
pub const FINISH_REASON_NONE: &str = "None";

/// The normalized result of one provider call.
///
/// Produced by the response normalizer from a vendor payload; everything
/// downstream (rendering, logging) works on this record only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub provider: Provider,
    /// Vendor-reported model identifier.
    pub model_name: String,
    /// Zero when the vendor omits usage data.
    pub total_tokens: u64,
    /// Assembled answer; never absent.
    pub content: String,
    pub finish_reason: String,
    /// Retrieval citations in vendor order; empty when not applicable.
    #[serde(default)]
    pub citations: Vec<String>,
    /// Safety/moderation summary, when the vendor supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    /// Wall-clock duration of the provider call only.
    pub duration_seconds: f64,
}

impl ModelResponse {
    /// Placeholder record for a payload that could not be normalized.
    pub fn empty(provider: Provider, model_name: impl Into<String>, finish_reason: &str) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
            total_tokens: 0,
            content: EMPTY_RESPONSE_MARKER.to_string(),
            finish_reason: finish_reason.to_string(),
            citations: Vec::new(),
            safety: None,
            duration_seconds: 0.0,
        }
    }

    /// Whether this record is the empty-response placeholder.
    pub fn is_empty_marker(&self) -> bool {
        self.content == EMPTY_RESPONSE_MARKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_placeholder() {
        let resp = ModelResponse::empty(Provider::Gemini, "models/gemini", FINISH_REASON_NONE);
        assert!(resp.is_empty_marker());
        assert_eq!(resp.total_tokens, 0);
        assert_eq!(resp.finish_reason, "None");
        assert!(resp.citations.is_empty());
    }

    #[test]
    fn test_safety_skipped_when_absent() {
        let resp = ModelResponse::empty(Provider::ChatGpt, "gpt-4o", FINISH_REASON_NOT_AVAILABLE);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("safety"));
        let parsed: ModelResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resp);
    }
}
