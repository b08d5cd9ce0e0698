use askall_types::error::NormalizationError;
use askall_types::provider::Provider;
use askall_types::response::{FINISH_REASON_NOT_AVAILABLE, ModelResponse};

use super::aggregate::{CANDIDATE_SEPARATOR, FinishReasons};
use crate::raw::chat_completion::{ChatChoice, ChatCompletion};

pub(super) fn normalize(
    provider: Provider,
    body: ChatCompletion,
) -> Result<ModelResponse, NormalizationError> {
    let (content, reasons) = aggregate_choices(&body.choices)?;

    Ok(ModelResponse {
        provider,
        model_name: body.model,
        total_tokens: body.usage.map(|u| u.total_tokens).unwrap_or(0),
        content,
        finish_reason: reasons.summarize(FINISH_REASON_NOT_AVAILABLE),
        citations: Vec::new(),
        safety: None,
        duration_seconds: 0.0,
    })
}

/// Join choice texts and collect their finish reasons.
///
/// Shared with Perplexity, which uses the same choice layout.
pub(super) fn aggregate_choices(
    choices: &[ChatChoice],
) -> Result<(String, FinishReasons), NormalizationError> {
    if choices.is_empty() {
        return Err(NormalizationError::NoCandidates);
    }

    let mut reasons = FinishReasons::default();
    let mut texts = Vec::with_capacity(choices.len());
    for choice in choices {
        let text = choice.text().ok_or(NormalizationError::EmptyCandidate)?;
        texts.push(text);
        if let Some(reason) = choice.finish_reason.as_deref() {
            reasons.push(reason);
        }
    }

    Ok((texts.join(CANDIDATE_SEPARATOR), reasons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::chat_completion::{ChatMessage, ChatUsage};

    fn completion(choices: Vec<ChatChoice>) -> ChatCompletion {
        ChatCompletion {
            model: "gpt-4o".to_string(),
            choices,
            usage: Some(ChatUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_choices_joined() {
        let body = completion(vec![
            ChatChoice::new(0, "A", "stop"),
            ChatChoice::new(1, "B", "length"),
        ]);
        let resp = normalize(Provider::ChatGpt, body).unwrap();
        assert_eq!(resp.content, "A\n---\nB");
        assert_eq!(resp.finish_reason, "stop, length");
        assert_eq!(resp.total_tokens, 15);
        assert_eq!(resp.model_name, "gpt-4o");
    }

    #[test]
    fn test_repeated_reason_collapses() {
        let body = completion(vec![
            ChatChoice::new(0, "A", "stop"),
            ChatChoice::new(1, "B", "stop"),
        ]);
        let resp = normalize(Provider::Cerebras, body).unwrap();
        assert_eq!(resp.finish_reason, "stop");
        assert_eq!(resp.provider, Provider::Cerebras);
    }

    #[test]
    fn test_missing_usage_and_reason() {
        let mut body = completion(vec![ChatChoice {
            index: 0,
            message: Some(ChatMessage {
                role: "assistant".to_string(),
                content: Some("x".to_string()),
            }),
            finish_reason: None,
        }]);
        body.usage = None;
        let resp = normalize(Provider::ChatGpt, body).unwrap();
        assert_eq!(resp.total_tokens, 0);
        assert_eq!(resp.finish_reason, "N/A");
    }

    #[test]
    fn test_no_choices_is_error() {
        let err = normalize(Provider::ChatGpt, completion(vec![])).unwrap_err();
        assert_eq!(err, NormalizationError::NoCandidates);
    }

    #[test]
    fn test_choice_without_content_is_error() {
        let body = completion(vec![ChatChoice {
            index: 0,
            message: None,
            finish_reason: Some("tool_calls".to_string()),
        }]);
        let err = normalize(Provider::ChatGpt, body).unwrap_err();
        assert_eq!(err, NormalizationError::EmptyCandidate);
    }
}
