//! Provider selector for the supported text-generation vendors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One external text-generation vendor.
///
/// Declaration order is the order used for display and for iterating
/// [`Provider::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    ChatGpt,
    Gemini,
    Perplexity,
    Cerebras,
}

impl Provider {
    /// Every supported provider.
    pub const ALL: [Provider; 4] = [
        Provider::ChatGpt,
        Provider::Gemini,
        Provider::Perplexity,
        Provider::Cerebras,
    ];

    /// Stable lowercase identifier (config keys, CLI values).
    pub fn slug(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "chatgpt",
            Provider::Gemini => "gemini",
            Provider::Perplexity => "perplexity",
            Provider::Cerebras => "cerebras",
        }
    }

    /// Name of the environment variable holding this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Perplexity => "PERPLEXITY_API_KEY",
            Provider::Cerebras => "CEREBRAS_API_KEY",
        }
    }

    /// Whether answers from this provider carry retrieval citations.
    pub fn supports_citations(&self) -> bool {
        matches!(self, Provider::Perplexity)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::ChatGpt => write!(f, "ChatGPT"),
            Provider::Gemini => write!(f, "Gemini"),
            Provider::Perplexity => write!(f, "Perplexity"),
            Provider::Cerebras => write!(f, "Cerebras"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Provider::ChatGpt),
            "gemini" => Ok(Provider::Gemini),
            "perplexity" => Ok(Provider::Perplexity),
            "cerebras" => Ok(Provider::Cerebras),
            other => Err(format!("invalid provider: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::ALL {
            let parsed: Provider = provider.slug().parse().unwrap();
            assert_eq!(provider, parsed);
            let parsed_display: Provider = provider.to_string().parse().unwrap();
            assert_eq!(provider, parsed_display);
        }
    }

    #[test]
    fn test_provider_serde() {
        let json = serde_json::to_string(&Provider::ChatGpt).unwrap();
        assert_eq!(json, "\"chatgpt\"");
        let parsed: Provider = serde_json::from_str("\"cerebras\"").unwrap();
        assert_eq!(parsed, Provider::Cerebras);
    }

    #[test]
    fn test_env_vars() {
        assert_eq!(Provider::ChatGpt.env_var(), "OPENAI_API_KEY");
        assert_eq!(Provider::Gemini.env_var(), "GEMINI_API_KEY");
        assert_eq!(Provider::Perplexity.env_var(), "PERPLEXITY_API_KEY");
        assert_eq!(Provider::Cerebras.env_var(), "CEREBRAS_API_KEY");
    }

    #[test]
    fn test_only_perplexity_cites() {
        let citing: Vec<_> = Provider::ALL
            .into_iter()
            .filter(Provider::supports_citations)
            .collect();
        assert_eq!(citing, vec![Provider::Perplexity]);
    }

    #[test]
    fn test_invalid_provider() {
        assert!("claude".parse::<Provider>().is_err());
    }
}
