use anyhow::Result;
use clap::Parser;
use std::path::Path;

mod cli;
mod commands;

use vectura::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Dispatch to appropriate command handler
    match args.command {
        cli::Commands::Calculate(calc) => {
            let cfg = load(&args.config)?;
            commands::calculate::execute(&cfg, calc).await?;
        }
        cli::Commands::Address { action } => {
            let cfg = load(&args.config)?;
            commands::address::execute(&cfg, action).await?;
        }
        cli::Commands::History { action } => {
            let cfg = load(&args.config)?;
            commands::history::execute(&cfg, action)?;
        }
        cli::Commands::Pinned { action } => {
            let cfg = load(&args.config)?;
            commands::pinned::execute(&cfg, action)?;
        }
        cli::Commands::Test => {
            // Logging defaults here; the file under test may be the broken part
            init_tracing(&config::LoggingConfig::default());
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Version => {
            println!("Vectura v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load configuration and initialize tracing from it
fn load(path: &Path) -> Result<config::Config> {
    let cfg = config::load_config(path)?;
    init_tracing(&cfg.logging);
    Ok(cfg)
}
