//! Business logic for askall.
//!
//! Defines the provider adapter port, the raw vendor payload union, the
//! response normalizer, the timed invocation wrapper, the concurrent
//! dispatcher, and the interaction log port. Concrete adapters and the
//! on-disk log live in `askall-infra`; this crate performs no network or
//! file I/O of its own.

pub mod dispatch;
pub mod log;
pub mod normalize;
pub mod provider;
pub mod raw;
pub mod report;
pub mod timed;
