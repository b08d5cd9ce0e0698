//! Prompt intake from stdin.

use std::io::{IsTerminal, Write};

use tokio::io::AsyncReadExt;

use askall_types::error::ConfigError;

const INTERACTIVE_HINT: &str = "Prompt (press Ctrl+D when done) > ";

/// Read the whole of stdin as the prompt.
///
/// Shows a hint first when stdin is a terminal and output is not quiet.
pub async fn read_prompt(quiet: bool) -> anyhow::Result<String> {
    if !quiet && std::io::stdin().is_terminal() {
        print!("{INTERACTIVE_HINT}");
        std::io::stdout().flush()?;
    }

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;
    Ok(clean_prompt(&raw)?)
}

/// Trim surrounding whitespace; an empty result is an error.
pub fn clean_prompt(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyPrompt);
    }
    Ok(trimmed.to_string())
}
