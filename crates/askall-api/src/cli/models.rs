//! List the models a provider offers.

use anyhow::Result;
use chrono::DateTime;

use askall_infra::http::build_client;
use askall_infra::provider::gemini::{GeminiAdapter, GeminiModel};
use askall_infra::provider::openai_compat::config::chatgpt_defaults;
use askall_infra::provider::openai_compat::{OpenAiCompatAdapter, OpenAiModel};
use askall_types::provider::Provider;

use super::ModelSource;
use crate::state::AppState;

pub async fn list_models(state: &AppState, source: ModelSource, json: bool) -> Result<()> {
    let client = build_client()?;

    match source {
        ModelSource::Chatgpt => {
            let key = state.credentials.require(Provider::ChatGpt)?;
            let config = chatgpt_defaults().with_override(&state.config.providers.chatgpt);
            let models = OpenAiCompatAdapter::new(client, key, config)
                .list_models()
                .await?;
            if json {
                let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
                println!("{}", serde_json::to_string_pretty(&ids)?);
            } else {
                print!("{}", format_openai_models(&models));
            }
        }
        ModelSource::Gemini => {
            let key = state.credentials.require(Provider::Gemini)?;
            let models = GeminiAdapter::new(client, key, &state.config.providers.gemini)
                .list_models()
                .await?;
            if json {
                let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                print!("{}", format_gemini_models(&models));
            }
        }
    }
    Ok(())
}

fn format_openai_models(models: &[OpenAiModel]) -> String {
    let mut out = String::from("Available OpenAI Models:\n");
    for model in models {
        let created = DateTime::from_timestamp(model.created, 0)
            .map(|t| t.to_rfc2822())
            .unwrap_or_else(|| model.created.to_string());
        if model.owned_by == "system" || model.owned_by.is_empty() {
            out.push_str(&format!("- {}: Created: {created}\n", model.id));
        } else {
            out.push_str(&format!(
                "- {}: Owned by: {}, Created: {created}\n",
                model.id, model.owned_by
            ));
        }
    }
    out
}

fn format_gemini_models(models: &[GeminiModel]) -> String {
    let mut out = String::from("--- Available Models ---\n");
    for model in models {
        out.push_str(&format!(
            "{} Display name: {} Supports: {}\n",
            model.name,
            model.display_name,
            model.supported_generation_methods.join(", ")
        ));
        let description = if model.description.is_empty() {
            "(none)"
        } else {
            model.description.as_str()
        };
        out.push_str(&format!("Description: {description}\n"));
        out.push_str("----------------------\n");
    }
    out.push_str("--- End of List ---\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_owner_omitted_for_system() {
        let models = vec![
            OpenAiModel {
                id: "gpt-4o".to_string(),
                created: 0,
                owned_by: "system".to_string(),
            },
            OpenAiModel {
                id: "ft:custom".to_string(),
                created: 0,
                owned_by: "acme".to_string(),
            },
        ];
        let out = format_openai_models(&models);
        assert!(out.contains("- gpt-4o: Created: Thu, 1 Jan 1970 00:00:00 +0000\n"));
        assert!(out.contains("- ft:custom: Owned by: acme, Created:"));
    }

    #[test]
    fn test_gemini_missing_description() {
        let models = vec![GeminiModel {
            name: "models/flash".to_string(),
            display_name: "Flash".to_string(),
            description: String::new(),
            supported_generation_methods: vec!["generateContent".to_string()],
        }];
        let out = format_gemini_models(&models);
        assert!(out.contains("models/flash Display name: Flash Supports: generateContent\n"));
        assert!(out.contains("Description: (none)\n"));
        assert!(out.ends_with("--- End of List ---\n"));
    }
}
