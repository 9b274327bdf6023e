//! phash CLI - perceptual fingerprint similarity from the command line
//!
//! Scores coefficient rows and hashes directly, and groups batches of
//! fingerprints into stacks of near-duplicate photos.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Correlate(args) => {
            cli::correlate_command(args)?;
        }
        Commands::Distance(args) => {
            cli::distance_command(args)?;
        }
        Commands::Stacks(args) => {
            cli::stacks_command(args).await?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
        Commands::InitConfig(args) => {
            cli::init_config(args).await?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args).await?;
        }
        Commands::Capabilities => {
            cli::capabilities_command();
        }
    }

    Ok(())
}
