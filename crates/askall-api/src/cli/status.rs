//! Credential and connectivity status.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use askall_infra::connectivity::is_online;
use askall_types::provider::Provider;

use crate::state::AppState;

/// Show which keys are set, whether the network is reachable, and overall readiness.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let online = is_online().await;
    let configured: Vec<(Provider, bool)> = Provider::ALL
        .into_iter()
        .map(|p| (p, state.credentials.is_set(p)))
        .collect();
    let ready = online && configured.iter().all(|(_, set)| *set);

    if json {
        let providers: serde_json::Map<String, serde_json::Value> = configured
            .iter()
            .map(|(p, set)| (p.slug().to_string(), serde_json::Value::Bool(*set)))
            .collect();
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "config_dir": state.config_dir.display().to_string(),
            "online": online,
            "providers": providers,
            "ready": ready,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} askall v{}", style("⚡").bold(), env!("CARGO_PKG_VERSION"));
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Provider").fg(Color::White),
        Cell::new("Variable").fg(Color::White),
        Cell::new("Key").fg(Color::White),
    ]);
    for (provider, set) in &configured {
        let key_cell = if *set {
            Cell::new("set").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(provider.to_string()),
            Cell::new(provider.env_var()),
            key_cell,
        ]);
    }
    println!("{table}");
    println!();

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };
    println!("  {} Internet reachable", check_mark(online));
    println!("  {} Ready to ask all providers", check_mark(ready));
    println!();
    Ok(())
}

/// List each credential variable with its masked value.
pub fn keys(state: &AppState, json: bool) -> Result<()> {
    let rows: Vec<(Provider, Option<String>)> = Provider::ALL
        .into_iter()
        .map(|p| (p, state.credentials.masked(p)))
        .collect();

    if json {
        let keys: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(p, masked)| {
                let value = masked
                    .clone()
                    .map(serde_json::Value::String)
                    .unwrap_or(serde_json::Value::Null);
                (p.env_var().to_string(), value)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    for (provider, masked) in &rows {
        println!("{}", key_line(*provider, masked.as_deref()));
    }
    Ok(())
}

fn key_line(provider: Provider, masked: Option<&str>) -> String {
    match masked {
        Some(value) => format!("{}: {value}", provider.env_var()),
        None => format!("{}: {}", provider.env_var(), style("not set").dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_line_shows_masked_value() {
        assert_eq!(
            key_line(Provider::ChatGpt, Some("sk-a...")),
            "OPENAI_API_KEY: sk-a..."
        );
    }

    #[test]
    fn test_key_line_unset() {
        let line = key_line(Provider::Gemini, None);
        assert!(line.starts_with("GEMINI_API_KEY: "));
        assert!(line.contains("not set"));
    }
}
