//! Shared domain types for askall.
//!
//! This crate contains the vendor-agnostic types used across the workspace:
//! the provider selector, the canonical [`response::ModelResponse`], the
//! persisted [`log::LogEntry`], configuration types, and error enums.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod log;
pub mod provider;
pub mod response;
