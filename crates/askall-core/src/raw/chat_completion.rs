//! OpenAI chat-completions response shape, shared by ChatGPT and Cerebras.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatChoice {
    /// Text content of the message, if the vendor supplied any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.content.as_deref())
    }
}

#[cfg(test)]
impl ChatChoice {
    /// Assistant choice for building test payloads.
    pub(crate) fn new(index: u32, content: impl Into<String>, finish_reason: &str) -> Self {
        Self {
            index,
            message: Some(ChatMessage {
                role: "assistant".to_string(),
                content: Some(content.into()),
            }),
            finish_reason: Some(finish_reason.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerates_missing_usage_and_extra_fields() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o",
            "system_fingerprint": "fp_x",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null, "refusal": "no"}, "finish_reason": "stop", "logprobs": null}]
        }"#;
        let parsed: ChatCompletion = serde_json::from_str(body).unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].text(), None);
        assert_eq!(parsed.choices[0].finish_reason.as_deref(), Some("stop"));
    }
}
