//! JSON-lines interaction log.
//!
//! One `LogEntry` per line. Each append is a single `write_all` of the
//! complete record plus `\n` on a file opened in append mode, so records
//! from concurrent writers never interleave. Writers in this process are
//! additionally serialized by a mutex; other processes rely on `O_APPEND`.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use askall_core::log::replay::parse_records;
use askall_core::log::{InteractionLog, ReplayReport};
use askall_types::error::LogError;
use askall_types::log::LogEntry;

#[derive(Debug)]
pub struct JsonlInteractionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlInteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InteractionLog for JsonlInteractionLog {
    async fn append(&self, entry: &LogEntry) -> Result<(), LogError> {
        let mut record = serde_json::to_vec(entry)?;
        record.push(b'\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&record).await?;
        file.sync_data().await?;

        tracing::debug!(path = %self.path.display(), bytes = record.len(), "appended log entry");
        Ok(())
    }

    async fn read_all(&self) -> Result<ReplayReport, LogError> {
        // Raw bytes: one torn record must not make the whole file unreadable.
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(parse_records(&bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no log file yet");
                Ok(ReplayReport::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
