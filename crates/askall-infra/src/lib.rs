//! Infrastructure for askall.
//!
//! Concrete implementations of the ports in `askall-core`: HTTP provider
//! adapters with mock fixtures, the JSON-lines interaction log, plus
//! startup configuration, credential loading and a connectivity probe.

pub mod config;
pub mod connectivity;
pub mod http;
pub mod log;
pub mod provider;
