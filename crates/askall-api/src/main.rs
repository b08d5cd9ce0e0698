//! askall CLI entry point.
//!
//! Binary name: `askall`
//!
//! Parses CLI arguments, loads configuration and credentials, then
//! dispatches to the requested command. With no subcommand the prompt on
//! stdin is sent to every selected provider.

mod cli;
mod render;
mod state;

use clap::Parser;
use clap_complete::generate;

use askall_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(TracingOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "askall", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    let result = match cli.command {
        None => cli::ask::ask(&state, &cli.ask, cli.quiet, cli.json).await,
        Some(Commands::Replay { index }) => cli::replay::replay(&state, index, cli.json).await,
        Some(Commands::Models { provider }) => {
            cli::models::list_models(&state, provider, cli.json).await
        }
        Some(Commands::Status) => cli::status::status(&state, cli.json).await,
        Some(Commands::Keys) => cli::status::keys(&state, cli.json),
        Some(Commands::Completions { .. }) => Ok(()),
    };

    shutdown_tracing();
    result
}
