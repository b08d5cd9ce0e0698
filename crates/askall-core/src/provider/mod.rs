//! Provider adapter port.
//!
//! - [`adapter`]: the `ProviderAdapter` trait every vendor adapter implements
//! - [`box_adapter`]: type-erased wrapper for runtime selection
//! - [`registry`]: adapters indexed by provider

pub mod adapter;
pub mod box_adapter;
pub mod registry;
