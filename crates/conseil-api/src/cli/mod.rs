//! CLI command definitions for the `conseil` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod config;
pub mod contact;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a credit advisor and send the summary to the team.
#[derive(Parser)]
#[command(name = "conseil", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Machine-readable output: JSON logs, JSON for `config`.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true, env = "CONSEIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a consultation chat.
    Chat(ChatArgs),

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Contact details collected before the chat starts.
///
/// Name and email are required; they are prompted for when missing and
/// stdin is a terminal.
#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Main credit challenge (e.g. "Faillite", "Proposition de consommateur").
    #[arg(long)]
    pub credit_challenge: Option<String>,

    /// Approximate credit score range.
    #[arg(long)]
    pub credit_score: Option<String>,

    /// Free-form message for the advisor.
    #[arg(long)]
    pub message: Option<String>,

    /// Where the visitor came from (campaign, referrer).
    #[arg(long)]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_chat_args() {
        let cli = Cli::try_parse_from([
            "conseil",
            "-v",
            "chat",
            "--name",
            "Eve Tremblay",
            "--email",
            "e@x.com",
            "--credit-score",
            "600-650",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.name.as_deref(), Some("Eve Tremblay"));
                assert_eq!(args.credit_score.as_deref(), Some("600-650"));
                assert!(args.phone.is_none());
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["conseil", "config", "--config", "/tmp/c.toml", "--json"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(cli.json);
    }
}
