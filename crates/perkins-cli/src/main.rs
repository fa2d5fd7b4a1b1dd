//! Perkins CLI entry point.
//!
//! Binary name: `perkins`
//!
//! Parses CLI arguments, resolves the data directory, then dispatches to
//! the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,perkins=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "perkins", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init();

    match cli.command {
        Commands::Init => {
            cli::init::run(&state).await?;
        }

        Commands::Chat { model, session } => {
            cli::chat::run_chat(&state, model, session).await?;
        }

        Commands::Models {
            add,
            delete,
            set_default,
        } => {
            cli::models::run(&state, add, delete, set_default).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
