//! The default command: fan one prompt out to the selected providers.

use std::sync::Arc;

use anyhow::Result;
use console::style;
use serde_json::json;

use askall_core::dispatch::{CallOutcome, DispatchSummary, Dispatcher, LogStatus, ProviderReport};
use askall_core::log::InteractionLog;
use askall_core::report::{format_failure, format_report};
use askall_infra::provider::build_registry;
use askall_types::config::RunOptions;
use askall_types::provider::Provider;

use super::AskArgs;
use super::prompt::read_prompt;
use crate::render::MarkdownRenderer;
use crate::state::AppState;

pub async fn ask(state: &AppState, args: &AskArgs, quiet: bool, json: bool) -> Result<()> {
    let selection = args.selection();
    if args.log && quiet {
        eprintln!("Not logging as quiet mode activated");
    }
    let options = RunOptions {
        mock: args.mock,
        log_interactions: args.log,
        quiet,
    };

    // Credentials are checked before the prompt is read.
    let registry = build_registry(&selection, &state.config, &state.credentials, args.mock)?;
    let prompt = read_prompt(quiet || json).await?;

    let output = Output::new(quiet, json);
    let summary = if options.logging_enabled() {
        let log = state.interaction_log()?;
        tracing::info!(path = %log.path().display(), "logging interactions");
        let dispatcher = Dispatcher::new(registry, Arc::new(log));
        run(dispatcher, &prompt, &selection, options, &output).await?
    } else {
        run(Dispatcher::without_log(registry), &prompt, &selection, options, &output).await?
    };

    if summary.succeeded() == 0 {
        anyhow::bail!("all {} providers failed", summary.failed());
    }
    Ok(())
}

async fn run<L: InteractionLog + 'static>(
    mut dispatcher: Dispatcher<L>,
    prompt: &str,
    selection: &[Provider],
    options: RunOptions,
    output: &Output,
) -> Result<DispatchSummary> {
    output.start(selection);
    let summary = dispatcher
        .run(prompt, selection, options, |report| output.report(report))
        .await?;
    output.finish();
    Ok(summary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Rendered,
    Quiet,
    Json,
}

struct Output {
    mode: Mode,
    renderer: Option<MarkdownRenderer>,
}

impl Output {
    fn new(quiet: bool, json: bool) -> Self {
        let mode = if json {
            Mode::Json
        } else if quiet {
            Mode::Quiet
        } else {
            Mode::Rendered
        };
        Self {
            mode,
            renderer: (mode == Mode::Rendered).then(MarkdownRenderer::new),
        }
    }

    fn start(&self, selection: &[Provider]) {
        if self.mode != Mode::Rendered {
            return;
        }
        for provider in selection {
            println!("{}", style(format!("Hitting {provider} API ...")).dim());
        }
        println!();
    }

    fn report(&self, report: &ProviderReport) {
        if let LogStatus::Failed(e) = &report.log_status {
            eprintln!(
                "{} could not log {} interaction: {e}",
                style("warning:").yellow().bold(),
                report.provider
            );
        }

        match (self.mode, &self.renderer) {
            (Mode::Json, _) => match report_json(report) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("failed to serialize {} report: {e}", report.provider),
            },
            (Mode::Quiet, _) => match &report.outcome {
                CallOutcome::Success(_) => println!("{}", report_text(report, true)),
                CallOutcome::Failure(_) => eprintln!("{}", report_text(report, true)),
            },
            (Mode::Rendered, Some(renderer)) => {
                print!("{}", renderer.render(&report_text(report, false)));
                println!();
            }
            (Mode::Rendered, None) => print!("{}", report_text(report, false)),
        }
    }

    fn finish(&self) {
        if let Some(renderer) = &self.renderer {
            print!("{}", renderer.render("# Done"));
        }
    }
}

fn report_text(report: &ProviderReport, quiet: bool) -> String {
    match &report.outcome {
        CallOutcome::Success(response) => format_report(response, quiet),
        CallOutcome::Failure(error) => format_failure(report.provider, error, report.elapsed, quiet),
    }
}

fn report_json(report: &ProviderReport) -> Result<String, serde_json::Error> {
    match &report.outcome {
        CallOutcome::Success(response) => serde_json::to_string(response),
        CallOutcome::Failure(error) => serde_json::to_string(&json!({
            "provider": report.provider,
            "error": error.to_string(),
            "duration_seconds": report.elapsed.as_secs_f64(),
        })),
    }
}
