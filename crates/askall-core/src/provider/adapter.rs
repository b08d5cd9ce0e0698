//! ProviderAdapter trait definition.
//!
//! Uses native async fn in traits (RPITIT). Not object-safe; wrap in
//! [`BoxProviderAdapter`](super::box_adapter::BoxProviderAdapter) for
//! dynamic dispatch.

use std::future::Future;

use askall_types::error::ProviderError;
use askall_types::provider::Provider;

use crate::raw::RawPayload;

/// One vendor endpoint.
///
/// Given a prompt and the mock flag, an adapter returns the vendor's raw
/// payload or an error. In mock mode it returns a deterministic canned
/// payload without touching the network.
pub trait ProviderAdapter: Send + Sync {
    /// Which vendor this adapter talks to.
    fn provider(&self) -> Provider;

    /// Model identifier requested from the vendor.
    fn model(&self) -> &str;

    /// Send `prompt` as a single user message.
    fn invoke(
        &self,
        prompt: &str,
        mock: bool,
    ) -> impl Future<Output = Result<RawPayload, ProviderError>> + Send;
}
