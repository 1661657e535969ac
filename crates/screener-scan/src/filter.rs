//! Penny stock price filter.

use crate::batch::collect_until;
use crate::config::PriceBounds;
use crate::report::{SkipStage, SkippedTicker};
use futures::{stream, StreamExt};
use screener_core::traits::BarSource;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Tickers that passed the filter, with the rest accounted for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Passing tickers in input order
    pub kept: Vec<String>,
    pub skipped: Vec<SkippedTicker>,
    pub timed_out: bool,
}

/// Keeps the tickers whose latest close lies strictly inside the bounds.
///
/// A ticker without a retrievable close is dropped, never an error.
pub struct PennyFilter {
    bars: Arc<dyn BarSource>,
    bounds: PriceBounds,
    max_concurrency: usize,
}

impl PennyFilter {
    pub fn new(bars: Arc<dyn BarSource>, bounds: PriceBounds) -> Self {
        Self {
            bars,
            bounds,
            max_concurrency: 1,
        }
    }

    /// Look up at most `max_concurrency` closes at a time.
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// Filter `tickers`, preserving their order.
    pub async fn filter(&self, tickers: &[String]) -> FilterOutcome {
        self.filter_until(tickers, None).await
    }

    /// Filter `tickers`, stopping at `deadline` with whatever has been checked.
    pub async fn filter_until(&self, tickers: &[String], deadline: Option<Instant>) -> FilterOutcome {
        let checks = stream::iter(tickers)
            .map(|ticker| self.check(ticker))
            .buffered(self.max_concurrency);

        let (results, timed_out) = collect_until(checks, deadline).await;

        let mut outcome = FilterOutcome {
            timed_out,
            ..Default::default()
        };
        for result in results {
            match result {
                Ok(ticker) => outcome.kept.push(ticker),
                Err(skip) => outcome.skipped.push(skip),
            }
        }
        outcome
    }

    async fn check(&self, ticker: &str) -> Result<String, SkippedTicker> {
        match self.bars.latest_close(ticker).await {
            Ok(Some(price)) if self.bounds.contains(price) => Ok(ticker.to_string()),
            Ok(Some(price)) => {
                trace!(ticker, price, "Outside price bounds");
                Err(SkippedTicker::new(
                    ticker,
                    SkipStage::PriceBounds,
                    format!(
                        "latest close {} outside ({}, {})",
                        price, self.bounds.low, self.bounds.high
                    ),
                ))
            }
            Ok(None) => {
                debug!(ticker, "No recent close");
                Err(SkippedTicker::new(ticker, SkipStage::PriceLookup, "no recent close"))
            }
            Err(e) => {
                debug!(ticker, error = %e, "Price lookup failed");
                Err(SkippedTicker::new(ticker, SkipStage::PriceLookup, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use screener_core::error::DataError;
    use screener_core::types::{Bar, Lookback};
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves a single bar per ticker at the given close.
    struct Closes(HashMap<String, f64>);

    impl Closes {
        fn new(prices: &[(&str, f64)]) -> Arc<Self> {
            Arc::new(Self(
                prices.iter().map(|(t, p)| (t.to_string(), *p)).collect(),
            ))
        }
    }

    #[async_trait]
    impl BarSource for Closes {
        async fn daily_bars(&self, ticker: &str, _lookback: Lookback) -> Result<Vec<Bar>, DataError> {
            match self.0.get(ticker) {
                Some(&close) if close < 0.0 => Ok(vec![]),
                Some(&close) => Ok(vec![Bar::new(0, close, close, close, close, 1000.0)]),
                None => Err(DataError::SymbolNotFound(ticker.to_string())),
            }
        }

        fn name(&self) -> &str {
            "closes"
        }
    }

    fn tickers(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keeps_prices_inside_bounds_in_order() {
        let bars = Closes::new(&[("A", 2.0), ("B", 10.0), ("C", 0.5)]);
        let filter = PennyFilter::new(bars, PriceBounds::default()).with_concurrency(4);

        let outcome = filter.filter(&tickers(&["A", "B", "C"])).await;
        assert_eq!(outcome.kept, vec!["A", "C"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].stage, SkipStage::PriceBounds);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn test_boundaries_excluded() {
        let bars = Closes::new(&[("LOW", 0.01), ("HIGH", 5.0), ("IN", 4.99)]);
        let filter = PennyFilter::new(bars, PriceBounds::default());

        let outcome = filter.filter(&tickers(&["LOW", "HIGH", "IN"])).await;
        assert_eq!(outcome.kept, vec!["IN"]);
    }

    #[tokio::test]
    async fn test_alternate_bounds() {
        let bars = Closes::new(&[("A", 0.15), ("B", 0.25)]);
        let filter = PennyFilter::new(bars, PriceBounds::new(0.2, 5.0));

        let outcome = filter.filter(&tickers(&["A", "B"])).await;
        assert_eq!(outcome.kept, vec!["B"]);
    }

    #[tokio::test]
    async fn test_missing_data_silently_excluded() {
        // Negative close stands for "no bars"
        let bars = Closes::new(&[("EMPTY", -1.0), ("OK", 1.0)]);
        let filter = PennyFilter::new(bars, PriceBounds::default());

        let outcome = filter.filter(&tickers(&["GONE", "EMPTY", "OK"])).await;
        assert_eq!(outcome.kept, vec!["OK"]);
        assert!(outcome
            .skipped
            .iter()
            .all(|s| s.stage == SkipStage::PriceLookup));
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicates_pass_through() {
        let bars = Closes::new(&[("A", 1.0)]);
        let filter = PennyFilter::new(bars, PriceBounds::default());

        let outcome = filter.filter(&tickers(&["A", "A"])).await;
        assert_eq!(outcome.kept, vec!["A", "A"]);
    }

    struct SlowBars;

    #[async_trait]
    impl BarSource for SlowBars {
        async fn daily_bars(&self, ticker: &str, _lookback: Lookback) -> Result<Vec<Bar>, DataError> {
            let secs = if ticker == "SLOW" { 120 } else { 1 };
            tokio::time::sleep(Duration::from_secs(secs)).await;
            Ok(vec![Bar::new(0, 1.0, 1.0, 1.0, 1.0, 1.0)])
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_returns_partial() {
        let filter = PennyFilter::new(Arc::new(SlowBars), PriceBounds::default());
        let deadline = Instant::now() + Duration::from_secs(30);

        let outcome = filter
            .filter_until(&tickers(&["A", "B", "SLOW", "C"]), Some(deadline))
            .await;
        assert_eq!(outcome.kept, vec!["A", "B"]);
        assert!(outcome.timed_out);
    }
}
