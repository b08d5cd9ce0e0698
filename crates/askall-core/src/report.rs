//! Text reports for completed provider calls.
//!
//! Produces the markdown the CLI prints: a `# <Provider>` header, a status
//! line, then the answer. Quiet mode emits the answer alone.

use std::fmt::Write as _;
use std::sync::LazyLock;
use std::time::Duration;

use askall_types::error::ProviderError;
use askall_types::provider::Provider;
use askall_types::response::ModelResponse;
use regex::Regex;

static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern is valid"));

/// One-line summary: model, tokens, finish reason, optional safety, duration.
pub fn status_line(response: &ModelResponse) -> String {
    let mut line = format!(
        "Model: {}, {} tokens used, finished due to: {}",
        response.model_name, response.total_tokens, response.finish_reason
    );
    if let Some(safety) = &response.safety {
        let _ = write!(line, ", safety rating: {safety}");
    }
    let _ = write!(line, ", duration: {:.3} seconds", response.duration_seconds);
    line
}

/// Rewrite `[n]` markers as markdown footnote references and append the
/// footnote definitions followed by a plain numbered list.
pub fn format_citations(content: &str, citations: &[String]) -> String {
    let mut out = CITATION_MARKER.replace_all(content, "[^$1]").into_owned();
    if citations.is_empty() {
        return out;
    }

    out.push_str("\n\n");
    for (idx, url) in citations.iter().enumerate() {
        let _ = writeln!(out, "[^{}]: {url}", idx + 1);
    }
    out.push_str("\n\nCitations:\n\n");
    let numbered: Vec<String> = citations
        .iter()
        .enumerate()
        .map(|(idx, url)| format!("{}. {url}", idx + 1))
        .collect();
    out.push_str(&numbered.join("\n"));
    out
}

/// Answer body, with citation formatting for providers that cite sources.
pub fn format_body(response: &ModelResponse) -> String {
    if response.provider.supports_citations() {
        format_citations(&response.content, &response.citations)
    } else {
        response.content.clone()
    }
}

/// Full report for one successful call.
pub fn format_report(response: &ModelResponse, quiet: bool) -> String {
    let body = format_body(response);
    if quiet {
        return body;
    }
    format!(
        "# {}\n\n{}\n\n{}\n\n",
        response.provider,
        status_line(response),
        body
    )
}

/// Report for a call that failed before producing a payload.
pub fn format_failure(
    provider: Provider,
    error: &ProviderError,
    elapsed: Duration,
    quiet: bool,
) -> String {
    let line = format!(
        "Request failed after {:.3} seconds: {error}",
        elapsed.as_secs_f64()
    );
    if quiet {
        return line;
    }
    format!("# {provider}\n\n{line}\n\n")
}
