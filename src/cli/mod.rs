//! CLI definitions.

pub mod commands;
pub mod sources;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "penny-screener")]
#[command(author, version, about = "Penny stock screener with technical-indicator scoring")]
pub struct Cli {
    /// Configuration file path; defaults and SCREENER__* variables apply without one
    #[arg(short, long, env = "SCREENER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to this file (rotated daily)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen the universe for penny stock candidates
    Scan(ScanArgs),
    /// Show the indicators, score and catalysts of one ticker
    Inspect(InspectArgs),
    /// Validate configuration
    ValidateConfig,
    /// Write the default configuration to a file
    InitConfig(InitConfigArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where bars and the universe come from, overriding the configured providers.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Read daily bars from per-symbol CSV files in this directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Read the ticker universe from this file
    #[arg(long)]
    pub universe_file: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Number of tickers to screen, from the front of the universe
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..=11000))]
    pub sample_size: Option<u64>,

    /// Exclusive lower price bound
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Exclusive upper price bound
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum score (0-4) for a ticker to be reported
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub min_score: Option<u8>,

    /// Skip the earnings calendar check
    #[arg(long)]
    pub no_earnings: bool,

    /// Skip the news catalyst check
    #[arg(long)]
    pub no_news: bool,

    /// Tickers processed concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Stop after this many seconds and report partial results
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write candidates to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Summary format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Ticker symbol
    pub ticker: String,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Destination file
    #[arg(short, long, default_value = "config/default.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
