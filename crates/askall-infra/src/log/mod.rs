//! Interaction log storage.

pub mod jsonl;

pub use jsonl::JsonlInteractionLog;
