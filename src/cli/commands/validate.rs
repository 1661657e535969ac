//! Validate configuration command.

use anyhow::Result;
use screener_config::load_config;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating default configuration with environment overrides"),
    }

    let config = match load_config(config_path).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let screener = &config.screener;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!(
        "Price bounds: ({}, {})",
        screener.price_bounds.low, screener.price_bounds.high
    );
    println!("Sample size: {}", screener.sample_size);
    println!("Minimum score: {}", screener.min_score);
    println!("Lookback: {}", screener.lookback);
    println!(
        "Catalysts: earnings {}, news {}",
        screener.enable_earnings_check, screener.enable_news_check
    );
    println!("Universe: {:?}", config.providers.universe);
    println!("Bars: {:?}", config.providers.bars);

    Ok(())
}
