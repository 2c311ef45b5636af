//! Nomen CLI - type-driven identifier naming checks
//!
//! Resolves candidate base names for types, checks single identifiers, and
//! lints batches of naming subjects against a type model.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Candidates(args) => {
            cli::candidates_command(args).await?;
        }
        Commands::Check(args) => {
            cli::check_command(args).await?;
        }
        Commands::Lint(args) => {
            cli::lint_command(args).await?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config().await?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args).await?;
        }
    }

    Ok(())
}
