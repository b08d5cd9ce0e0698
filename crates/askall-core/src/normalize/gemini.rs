use askall_types::error::NormalizationError;
use askall_types::provider::Provider;
use askall_types::response::{FINISH_REASON_NONE, ModelResponse};
use tracing::warn;

use super::aggregate::{CANDIDATE_SEPARATOR, FinishReasons};
use crate::raw::gemini::{Candidate, GenerateContentResponse};

/// Gemini's placeholder for "no reason given".
const FINISH_REASON_UNSPECIFIED: &str = "FINISH_REASON_UNSPECIFIED";

pub(super) fn normalize(
    model: String,
    body: GenerateContentResponse,
) -> Result<ModelResponse, NormalizationError> {
    if body.candidates.is_empty() {
        return Err(NormalizationError::NoCandidates);
    }

    let mut reasons = FinishReasons::default();
    let mut texts = Vec::with_capacity(body.candidates.len());
    let mut ratings = Vec::new();

    for candidate in &body.candidates {
        texts.push(candidate_text(candidate)?);

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != FINISH_REASON_UNSPECIFIED {
                reasons.push(reason);
            }
        }
        ratings.extend(
            candidate
                .safety_ratings
                .iter()
                .map(|r| format!("{}: {}", r.category, r.probability)),
        );
    }

    Ok(ModelResponse {
        provider: Provider::Gemini,
        model_name: model,
        total_tokens: body.usage_metadata.map(|u| u.total_token_count).unwrap_or(0),
        content: texts.join(CANDIDATE_SEPARATOR),
        finish_reason: reasons.summarize(FINISH_REASON_NONE),
        citations: Vec::new(),
        safety: (!ratings.is_empty()).then(|| ratings.join(", ")),
        duration_seconds: 0.0,
    })
}

/// Concatenate a candidate's text parts, skipping non-text parts.
fn candidate_text(candidate: &Candidate) -> Result<String, NormalizationError> {
    let content = candidate
        .content
        .as_ref()
        .ok_or(NormalizationError::EmptyCandidate)?;

    let mut text = String::new();
    let mut found_text = false;
    for part in &content.parts {
        match part.text.as_deref() {
            Some(t) => {
                text.push_str(t);
                found_text = true;
            }
            None => warn!(index = candidate.index, "ignoring non-text Gemini part"),
        }
    }

    if found_text {
        Ok(text)
    } else {
        Err(NormalizationError::EmptyCandidate)
    }
}
