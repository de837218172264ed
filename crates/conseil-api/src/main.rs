//! Conseil CLI entry point.
//!
//! Binary name: `conseil`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the chat loop or one of the utility commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use conseil_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut tracing_options = TracingOptions::from_verbosity(cli.verbose, cli.quiet);
    tracing_options.json = cli.json;
    tracing_options.otel = cli.otel;
    init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        // Shell completions don't need configuration
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "conseil", &mut std::io::stdout());
            Ok(())
        }
        Commands::Config => match AppState::init(cli.config.as_deref()).await {
            Ok(state) => cli::config::show_config(&state, cli.json),
            Err(e) => Err(e),
        },
        Commands::Chat(args) => match AppState::init(cli.config.as_deref()).await {
            Ok(state) => cli::chat::loop_runner::run_chat_loop(&state, args).await,
            Err(e) => Err(e),
        },
    };

    shutdown_tracing();
    result
}
