//! Perplexity chat-completions response shape.
//!
//! Same choice layout as OpenAI plus a top-level `citations` list and a
//! search context size in the usage block.

use serde::{Deserialize, Serialize};

use super::chat_completion::ChatChoice;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerplexityResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub usage: Option<PerplexityUsage>,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerplexityUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_context_size: Option<String>,
}
