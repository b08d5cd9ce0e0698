//! BoxProviderAdapter: object-safe dynamic dispatch wrapper.
//!
//! An object-safe `ProviderAdapterDyn` with boxed futures, a blanket impl
//! for every `ProviderAdapter`, and a cloneable handle that delegates.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use askall_types::error::ProviderError;
use askall_types::provider::Provider;

use super::adapter::ProviderAdapter;
use crate::raw::RawPayload;

/// Object-safe version of [`ProviderAdapter`].
pub trait ProviderAdapterDyn: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    fn invoke_boxed<'a>(
        &'a self,
        prompt: &'a str,
        mock: bool,
    ) -> Pin<Box<dyn Future<Output = Result<RawPayload, ProviderError>> + Send + 'a>>;
}

impl<T: ProviderAdapter> ProviderAdapterDyn for T {
    fn provider(&self) -> Provider {
        ProviderAdapter::provider(self)
    }

    fn model(&self) -> &str {
        ProviderAdapter::model(self)
    }

    fn invoke_boxed<'a>(
        &'a self,
        prompt: &'a str,
        mock: bool,
    ) -> Pin<Box<dyn Future<Output = Result<RawPayload, ProviderError>> + Send + 'a>> {
        Box::pin(self.invoke(prompt, mock))
    }
}

/// Type-erased adapter handle.
///
/// Cheap to clone so each dispatch unit can own one inside a spawned task.
#[derive(Clone)]
pub struct BoxProviderAdapter {
    inner: Arc<dyn ProviderAdapterDyn>,
}

impl BoxProviderAdapter {
    pub fn new<T: ProviderAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Arc::new(adapter),
        }
    }

    pub fn provider(&self) -> Provider {
        self.inner.provider()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    pub async fn invoke(&self, prompt: &str, mock: bool) -> Result<RawPayload, ProviderError> {
        self.inner.invoke_boxed(prompt, mock).await
    }
}

impl std::fmt::Debug for BoxProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxProviderAdapter")
            .field("provider", &self.provider())
            .field("model", &self.model())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::chat_completion::{ChatChoice, ChatCompletion};

    struct EchoAdapter;

    impl ProviderAdapter for EchoAdapter {
        fn provider(&self) -> Provider {
            Provider::Cerebras
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn invoke(&self, prompt: &str, _mock: bool) -> Result<RawPayload, ProviderError> {
            Ok(RawPayload::ChatCompletion {
                provider: Provider::Cerebras,
                body: ChatCompletion {
                    model: "echo-1".to_string(),
                    choices: vec![ChatChoice::new(0, prompt, "stop")],
                    ..Default::default()
                },
            })
        }
    }

    #[tokio::test]
    async fn test_box_adapter_delegates() {
        let boxed = BoxProviderAdapter::new(EchoAdapter);
        let cloned = boxed.clone();
        assert_eq!(cloned.provider(), Provider::Cerebras);
        assert_eq!(cloned.model(), "echo-1");

        let raw = cloned.invoke("ping", false).await.unwrap();
        match raw {
            RawPayload::ChatCompletion { body, .. } => {
                assert_eq!(body.choices[0].text(), Some("ping"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
