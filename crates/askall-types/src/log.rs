//! Persisted interaction log record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::response::ModelResponse;

/// One line of the interaction log.
///
/// A flattened projection of a [`ModelResponse`] plus the originating
/// prompt and a capture timestamp. Field names are the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub model_name: String,
    pub total_tokens: u64,
    pub duration_seconds: f64,
    pub stop_reason: String,
    pub prompt_text: String,
    pub model_response: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Project a completed call into a log record captured at `timestamp`.
    pub fn from_response(response: &ModelResponse, prompt: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            model_name: response.model_name.clone(),
            total_tokens: response.total_tokens,
            duration_seconds: response.duration_seconds,
            stop_reason: response.finish_reason.clone(),
            prompt_text: prompt.to_string(),
            model_response: response.content.clone(),
            timestamp,
        }
    }
}
