//! Interaction log port.
//!
//! The dispatcher appends through [`InteractionLog`]; the replay helpers in
//! [`replay`] order and select what a store returns. The JSON-lines file
//! implementation lives in `askall-infra`.

pub mod replay;

use std::future::Future;

use askall_types::error::{LogError, ReplayParseError};
use askall_types::log::LogEntry;

/// Records read back from a store, plus the ones that failed to parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub entries: Vec<LogEntry>,
    pub skipped: Vec<ReplayParseError>,
}

/// Append-only store of completed calls.
pub trait InteractionLog: Send + Sync {
    /// Append one record. Concurrent appends must never interleave.
    fn append(&self, entry: &LogEntry) -> impl Future<Output = Result<(), LogError>> + Send;

    /// Every stored record in storage order. A missing store is empty.
    fn read_all(&self) -> impl Future<Output = Result<ReplayReport, LogError>> + Send;
}

/// A log that stores nothing, for runs without logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInteractionLog;

impl InteractionLog for NullInteractionLog {
    async fn append(&self, _entry: &LogEntry) -> Result<(), LogError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<ReplayReport, LogError> {
        Ok(ReplayReport::default())
    }
}
