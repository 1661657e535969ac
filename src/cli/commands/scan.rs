//! Scan command implementation.

use anyhow::{Context, Result};
use screener_config::AppConfig;
use screener_scan::{export_csv, ScreenerConfig};
use tracing::info;

use crate::cli::{sources, OutputFormat, ScanArgs};

/// Apply command-line overrides to the screener settings.
fn apply_overrides(screener: &mut ScreenerConfig, args: &ScanArgs) {
    if let Some(n) = args.sample_size {
        screener.sample_size = n as usize;
    }
    if let Some(low) = args.min_price {
        screener.price_bounds.low = low;
    }
    if let Some(high) = args.max_price {
        screener.price_bounds.high = high;
    }
    if let Some(min_score) = args.min_score {
        screener.min_score = min_score;
    }
    if args.no_earnings {
        screener.enable_earnings_check = false;
    }
    if args.no_news {
        screener.enable_news_check = false;
    }
    if let Some(concurrency) = args.concurrency {
        screener.max_concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        screener.batch_timeout_secs = Some(timeout);
    }
}

pub async fn run(args: &ScanArgs, mut config: AppConfig) -> Result<()> {
    sources::apply_overrides(&mut config, &args.sources);
    apply_overrides(&mut config.screener, args);
    config.validate().context("Invalid configuration")?;

    info!(
        sample_size = config.screener.sample_size,
        min_score = config.screener.min_score,
        "Starting scan"
    );

    let pipeline = sources::pipeline(&config)?;
    let report = pipeline.run().await.context("Scan failed")?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(path) = &args.output {
        export_csv(&report.candidates, pipeline.catalysts_enabled(), path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Results saved to {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "penny-screener",
            "scan",
            "-n",
            "50",
            "--min-price",
            "0.2",
            "--min-score",
            "2",
            "--no-earnings",
            "--timeout",
            "120",
        ])
        .unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };

        let mut screener = ScreenerConfig::default();
        apply_overrides(&mut screener, &args);

        assert_eq!(screener.sample_size, 50);
        assert_eq!(screener.price_bounds.low, 0.2);
        assert_eq!(screener.price_bounds.high, 5.0);
        assert_eq!(screener.min_score, 2);
        assert!(!screener.enable_earnings_check);
        assert!(screener.enable_news_check);
        assert_eq!(screener.batch_timeout_secs, Some(120));
    }
}
