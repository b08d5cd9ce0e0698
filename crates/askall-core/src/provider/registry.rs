//! Registry of adapters, one per provider.

use std::collections::BTreeMap;

use askall_types::error::ConfigError;
use askall_types::provider::Provider;

use super::box_adapter::BoxProviderAdapter;

/// Adapters indexed by provider, iterated in declaration order.
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
    adapters: BTreeMap<Provider, BoxProviderAdapter>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own provider, replacing any existing one.
    pub fn register(&mut self, adapter: BoxProviderAdapter) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    pub fn get(&self, provider: Provider) -> Option<&BoxProviderAdapter> {
        self.adapters.get(&provider)
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.adapters.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Resolve a selection to adapters, deduplicating repeated providers.
    ///
    /// Fails if the selection is empty or names a provider with no adapter.
    pub fn select(&self, selection: &[Provider]) -> Result<Vec<BoxProviderAdapter>, ConfigError> {
        if selection.is_empty() {
            return Err(ConfigError::InvalidSelection(
                "no providers selected".to_string(),
            ));
        }

        let mut chosen: Vec<BoxProviderAdapter> = Vec::with_capacity(selection.len());
        for provider in selection {
            if chosen.iter().any(|a| a.provider() == *provider) {
                continue;
            }
            let adapter = self.get(*provider).ok_or_else(|| {
                ConfigError::InvalidSelection(format!("{provider} is not configured"))
            })?;
            chosen.push(adapter.clone());
        }
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::adapter::ProviderAdapter;
    use crate::raw::RawPayload;
    use askall_types::error::ProviderError;

    struct Stub(Provider);

    impl ProviderAdapter for Stub {
        fn provider(&self) -> Provider {
            self.0
        }

        fn model(&self) -> &str {
            "stub"
        }

        async fn invoke(&self, _prompt: &str, _mock: bool) -> Result<RawPayload, ProviderError> {
            Err(ProviderError::Transport("stub".to_string()))
        }
    }

    fn registry() -> AdapterRegistry {
        let mut reg = AdapterRegistry::new();
        reg.register(BoxProviderAdapter::new(Stub(Provider::Perplexity)));
        reg.register(BoxProviderAdapter::new(Stub(Provider::ChatGpt)));
        reg
    }

    #[test]
    fn test_providers_in_declaration_order() {
        assert_eq!(
            registry().providers(),
            vec![Provider::ChatGpt, Provider::Perplexity]
        );
    }

    #[test]
    fn test_select_dedups() {
        let chosen = registry()
            .select(&[Provider::Perplexity, Provider::Perplexity, Provider::ChatGpt])
            .unwrap();
        assert_eq!(chosen.len(), 2);
        assert_eq!(chosen[0].provider(), Provider::Perplexity);
    }

    #[test]
    fn test_select_unknown_and_empty() {
        let reg = registry();
        assert!(matches!(
            reg.select(&[Provider::Gemini]),
            Err(ConfigError::InvalidSelection(_))
        ));
        assert!(matches!(
            reg.select(&[]),
            Err(ConfigError::InvalidSelection(_))
        ));
    }
}
