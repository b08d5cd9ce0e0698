use askall_types::error::NormalizationError;
use askall_types::provider::Provider;
use askall_types::response::{FINISH_REASON_NOT_AVAILABLE, ModelResponse};

use super::chat_completion::aggregate_choices;
use crate::raw::perplexity::PerplexityResponse;

pub(super) fn normalize(body: PerplexityResponse) -> Result<ModelResponse, NormalizationError> {
    let (content, reasons) = aggregate_choices(&body.choices)?;

    Ok(ModelResponse {
        provider: Provider::Perplexity,
        model_name: body.model,
        total_tokens: body.usage.map(|u| u.total_tokens).unwrap_or(0),
        content,
        finish_reason: reasons.summarize(FINISH_REASON_NOT_AVAILABLE),
        citations: body.citations,
        safety: None,
        duration_seconds: 0.0,
    })
}
