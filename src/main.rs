//! Penny stock screener CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use screener_config::{load_config, AppConfig};
use screener_monitor::{setup_logging, LogGuard};
use std::path::PathBuf;

/// Load configuration and start logging for the scanning commands.
fn prepare(cli: &Cli) -> Result<(AppConfig, LogGuard)> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    let guard = setup_logging(
        &level,
        cli.json_logs || config.logging.is_json(),
        log_file.as_deref(),
    );

    Ok((config, guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan(args) => {
            let (config, _guard) = prepare(&cli)?;
            cli::commands::scan::run(args, config).await
        }
        Commands::Inspect(args) => {
            let (config, _guard) = prepare(&cli)?;
            cli::commands::inspect::run(args, config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref()),
        Commands::InitConfig(args) => cli::commands::init_config::run(args),
    }
}
