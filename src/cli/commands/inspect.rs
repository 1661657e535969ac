//! Inspect command implementation.

use anyhow::{bail, Result};
use chrono::Local;
use screener_config::AppConfig;

use crate::cli::{sources, InspectArgs};

pub async fn run(args: &InspectArgs, mut config: AppConfig) -> Result<()> {
    sources::apply_overrides(&mut config, &args.sources);
    config.validate()?;

    let ticker = args.ticker.trim().to_uppercase();
    let pipeline = sources::pipeline(&config)?;

    let candidate = match pipeline.inspect(&ticker, Local::now().date_naive()).await {
        Ok(candidate) => candidate,
        Err(skip) => bail!("{} skipped at {}: {}", skip.ticker, skip.stage, skip.reason),
    };

    let ind = &candidate.indicators;
    let bounds = config.screener.price_bounds;
    println!("{}", candidate.ticker);
    println!("───────────────────────────────────────────────────────────");
    println!(
        "  Price:               {:.4} ({} penny range)",
        candidate.price,
        if bounds.contains(candidate.price) { "inside" } else { "outside" }
    );
    println!("  RSI:                 {:.2}", ind.rsi);
    println!("  MACD / Signal:       {:.4} / {:.4}", ind.macd, ind.macd_signal);
    println!("  ADX:                 {:.2}", ind.adx);
    println!(
        "  Volume / Average:    {:.0} / {:.0}",
        ind.latest_volume, ind.average_volume
    );
    println!("  Score:               {}/4", candidate.score);
    println!();

    if !pipeline.catalysts_enabled() {
        println!("  Catalysts:           not checked (no earnings or news source)");
        return Ok(());
    }

    let catalyst = &candidate.catalyst;
    match catalyst.earnings_date {
        Some(date) if catalyst.earnings_soon => println!("  Earnings:            {} (soon)", date),
        Some(date) => println!("  Earnings:            {}", date),
        None => println!("  Earnings:            unknown"),
    }
    match &catalyst.headline {
        Some(headline) => println!("  News catalyst:       {}", headline),
        None => println!("  News catalyst:       none"),
    }

    Ok(())
}
