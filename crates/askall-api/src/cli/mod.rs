//! CLI definitions for the `askall` binary.
//!
//! With no subcommand, `askall` reads a prompt from stdin and sends it to
//! the providers picked by the selection flags (all four when none is
//! given).

pub mod ask;
pub mod models;
pub mod prompt;
pub mod replay;
pub mod status;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use askall_types::provider::Provider;

/// Ask several LLM providers the same question at once.
#[derive(Parser)]
#[command(name = "askall", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub ask: AskArgs,

    /// Output machine-readable JSON instead of rendered markdown.
    #[arg(long, global = true)]
    pub json: bool,

    /// Raw output only; also turns off interaction logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed diagnostics (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry to stdout.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Provider selection and run options for the default ask command.
#[derive(Args, Debug, Default, Clone)]
pub struct AskArgs {
    /// Use ChatGPT.
    #[arg(short = 'c', long)]
    pub chatgpt: bool,

    /// Use Gemini.
    #[arg(short = 'g', long)]
    pub gemini: bool,

    /// Use Perplexity.
    #[arg(short = 'p', long)]
    pub perplexity: bool,

    /// Use Cerebras.
    #[arg(short = 'f', long)]
    pub cerebras: bool,

    /// Append each response to the interaction log.
    #[arg(short = 'l', long)]
    pub log: bool,

    /// Return canned responses without calling any API.
    #[arg(long)]
    pub mock: bool,
}

impl AskArgs {
    /// Providers picked by the flags; all of them when none is set.
    pub fn selection(&self) -> Vec<Provider> {
        let picked: Vec<Provider> = [
            (self.chatgpt, Provider::ChatGpt),
            (self.gemini, Provider::Gemini),
            (self.perplexity, Provider::Perplexity),
            (self.cerebras, Provider::Cerebras),
        ]
        .into_iter()
        .filter_map(|(on, p)| on.then_some(p))
        .collect();

        if picked.is_empty() {
            Provider::ALL.to_vec()
        } else {
            picked
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List logged interactions, or show the full response at INDEX.
    #[command(alias = "rl")]
    Replay {
        /// Position in the newest-first listing.
        index: Option<usize>,
    },

    /// List the models a provider offers.
    Models {
        #[arg(value_enum)]
        provider: ModelSource,
    },

    /// Show credential and connectivity status.
    Status,

    /// Show configured API keys, masked.
    Keys,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Providers with a model listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelSource {
    Chatgpt,
    Gemini,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_selects_all() {
        let cli = Cli::try_parse_from(["askall"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.ask.selection(), Provider::ALL.to_vec());
    }

    #[test]
    fn test_combined_short_flags() {
        let cli = Cli::try_parse_from(["askall", "-cp", "-l"]).unwrap();
        assert_eq!(
            cli.ask.selection(),
            vec![Provider::ChatGpt, Provider::Perplexity]
        );
        assert!(cli.ask.log);
    }

    #[test]
    fn test_replay_alias_with_index() {
        let cli = Cli::try_parse_from(["askall", "rl", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Replay { index: Some(3) })));
    }

    #[test]
    fn test_global_quiet_and_verbose() {
        let cli = Cli::try_parse_from(["askall", "-q", "-vv", "-g", "--mock"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(cli.ask.mock);
        assert_eq!(cli.ask.selection(), vec![Provider::Gemini]);
    }

    #[test]
    fn test_models_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["askall", "models", "perplexity"]).is_err());
        let cli = Cli::try_parse_from(["askall", "models", "gemini"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Models {
                provider: ModelSource::Gemini
            })
        ));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
