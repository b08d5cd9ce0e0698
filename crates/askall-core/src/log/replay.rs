//! Reading the interaction log back.

use askall_types::error::{LogError, ReplayParseError};
use askall_types::log::LogEntry;
use tracing::warn;

use super::{InteractionLog, ReplayReport};

/// Parse JSON-lines bytes. Blank lines are ignored; unparseable lines,
/// including ones that are not valid UTF-8, are reported in `skipped` with
/// their 1-based line number.
pub fn parse_records(bytes: &[u8]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (idx, line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<LogEntry>(line) {
            Ok(entry) => report.entries.push(entry),
            Err(e) => report.skipped.push(ReplayParseError {
                line: idx + 1,
                message: e.to_string(),
            }),
        }
    }
    report
}

/// Newest first. Stable, so equal timestamps keep storage order.
pub fn order_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Read the log, newest first, optionally narrowed to the entry at `index`.
pub async fn replay<L: InteractionLog>(
    log: &L,
    index: Option<usize>,
) -> Result<ReplayReport, LogError> {
    let ReplayReport {
        mut entries,
        skipped,
    } = log.read_all().await?;

    for err in &skipped {
        warn!(line = err.line, error = %err.message, "skipping unparseable log record");
    }

    order_newest_first(&mut entries);

    let entries = match index {
        None => entries,
        Some(index) => {
            let len = entries.len();
            if index >= len {
                return Err(LogError::IndexOutOfRange { index, len });
            }
            vec![entries.swap_remove(index)]
        }
    };

    Ok(ReplayReport { entries, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(prompt: &str, hour: u32) -> LogEntry {
        LogEntry {
            model_name: "gpt-4o".to_string(),
            total_tokens: 1,
            duration_seconds: 0.1,
            stop_reason: "stop".to_string(),
            prompt_text: prompt.to_string(),
            model_response: "r".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 4, 24, hour, 0, 0).unwrap(),
        }
    }

    struct Fixed(Vec<LogEntry>);

    impl InteractionLog for Fixed {
        async fn append(&self, _entry: &LogEntry) -> Result<(), LogError> {
            Ok(())
        }

        async fn read_all(&self) -> Result<ReplayReport, LogError> {
            Ok(ReplayReport {
                entries: self.0.clone(),
                skipped: vec![],
            })
        }
    }

    #[test]
    fn test_parse_records_skips_bad_lines() {
        let good = serde_json::to_string(&entry("p", 1)).unwrap();
        let text = format!("{good}\n\nnot json\n{good}\n");
        let report = parse_records(text.as_bytes());
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
    }

    #[test]
    fn test_parse_records_crlf_and_invalid_utf8() {
        let good = serde_json::to_string(&entry("p", 1)).unwrap();
        let mut bytes = format!("{good}\r\n").into_bytes();
        bytes.extend_from_slice(b"{\"model_name\":\"\xff\xfe\n");
        bytes.extend_from_slice(good.as_bytes());

        let report = parse_records(&bytes);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn test_order_is_stable_on_ties() {
        let mut entries = vec![entry("a", 1), entry("b", 3), entry("c", 1)];
        order_newest_first(&mut entries);
        let prompts: Vec<_> = entries.iter().map(|e| e.prompt_text.as_str()).collect();
        assert_eq!(prompts, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_replay_select_index() {
        let log = Fixed(vec![entry("old", 1), entry("new", 5)]);
        let all = replay(&log, None).await.unwrap();
        assert_eq!(all.entries[0].prompt_text, "new");

        let one = replay(&log, Some(1)).await.unwrap();
        assert_eq!(one.entries.len(), 1);
        assert_eq!(one.entries[0].prompt_text, "old");
    }

    #[tokio::test]
    async fn test_replay_index_out_of_range() {
        let log = Fixed(vec![entry("a", 1), entry("b", 2)]);
        let err = replay(&log, Some(5)).await.unwrap_err();
        assert!(matches!(err, LogError::IndexOutOfRange { index: 5, len: 2 }));
    }
}
