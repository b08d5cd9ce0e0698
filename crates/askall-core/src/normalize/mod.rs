//! Response normalization.
//!
//! Turns a vendor [`RawPayload`] into the canonical [`ModelResponse`]. The
//! same aggregation rules apply to every vendor:
//!
//! - candidate texts are joined with [`CANDIDATE_SEPARATOR`]
//! - finish reasons are reduced to an ordered set of distinct tokens
//! - a missing token count becomes zero
//!
//! A payload that cannot be normalized yields the empty-response
//! placeholder rather than an error.

mod aggregate;
mod chat_completion;
mod gemini;
mod perplexity;

use std::time::Duration;

use askall_types::error::NormalizationError;
use askall_types::provider::Provider;
use askall_types::response::{FINISH_REASON_NONE, FINISH_REASON_NOT_AVAILABLE, ModelResponse};
use tracing::warn;

use crate::raw::RawPayload;

pub use aggregate::{CANDIDATE_SEPARATOR, FinishReasons};

/// Normalize `raw` and stamp it with the call's `elapsed` time.
pub fn normalize(raw: RawPayload, elapsed: Duration) -> ModelResponse {
    let provider = raw.provider();
    let model = raw.model_name().to_string();

    let result = match raw {
        RawPayload::ChatCompletion { provider, body } => chat_completion::normalize(provider, body),
        RawPayload::Gemini { model, body } => gemini::normalize(model, body),
        RawPayload::Perplexity { body } => perplexity::normalize(body),
        RawPayload::Malformed { reason, .. } => Err(NormalizationError::Malformed(reason)),
    };

    let mut response = result.unwrap_or_else(|err| {
        warn!(%provider, model = %model, error = %err, "substituting empty response");
        ModelResponse::empty(provider, model, fallback_finish_reason(provider))
    });
    response.duration_seconds = elapsed.as_secs_f64();
    response
}

/// Finish reason reported when the vendor gave none.
pub fn fallback_finish_reason(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => FINISH_REASON_NONE,
        Provider::ChatGpt | Provider::Perplexity | Provider::Cerebras => FINISH_REASON_NOT_AVAILABLE,
    }
}
