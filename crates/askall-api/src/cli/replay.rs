//! Replay the interaction log.

use anyhow::Result;
use console::style;

use askall_core::log::replay::replay as read_replay;
use askall_types::log::LogEntry;

use crate::render::MarkdownRenderer;
use crate::state::AppState;

/// Prompts longer than this are cut in the listing.
const PROMPT_PREVIEW_CHARS: usize = 120;

pub async fn replay(state: &AppState, index: Option<usize>, json: bool) -> Result<()> {
    let log = state.interaction_log()?;
    let report = read_replay(&log, index).await?;

    for skipped in &report.skipped {
        eprintln!(
            "{} skipped unreadable record at {} {skipped}",
            style("warning:").yellow().bold(),
            log.path().display()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.entries)?);
        return Ok(());
    }

    match index {
        Some(_) => {
            let renderer = MarkdownRenderer::new();
            for entry in &report.entries {
                print!("{}", renderer.render(&entry.model_response));
            }
        }
        None if report.entries.is_empty() => {
            println!("No logged interactions in {}", log.path().display());
        }
        None => {
            for (i, entry) in report.entries.iter().enumerate() {
                println!("{}", summary_line(i, entry));
            }
        }
    }
    Ok(())
}

/// `<i> :: <timestamp> :: <model>` followed by an indented prompt preview.
pub fn summary_line(index: usize, entry: &LogEntry) -> String {
    format!(
        "{index} :: {} :: {}\n\t> {}\n",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.model_name,
        preview_prompt(&entry.prompt_text)
    )
}

fn preview_prompt(prompt: &str) -> String {
    let mut preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    if prompt.chars().count() > PROMPT_PREVIEW_CHARS {
        preview.push_str(" ...");
    }
    preview.replace('\n', "\n\t")
}
