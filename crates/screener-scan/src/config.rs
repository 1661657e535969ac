//! Screening configuration.

use screener_core::error::ScreenerError;
use screener_core::types::Lookback;
use screener_indicators::{IndicatorEngine, IndicatorPeriods, DEFAULT_MIN_BARS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Open price interval a penny stock's latest close must lie in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Exclusive lower bound
    pub low: f64,
    /// Exclusive upper bound
    pub high: f64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self { low: 0.01, high: 5.0 }
    }
}

impl PriceBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `price` lies strictly between the bounds.
    pub fn contains(&self, price: f64) -> bool {
        price > self.low && price < self.high
    }
}

/// Screening pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Latest close must lie strictly inside these bounds
    pub price_bounds: PriceBounds,
    /// Minimum score (0 to 4) for a ticker to be reported
    pub min_score: u8,
    /// Minimum daily bars before a ticker is scored
    pub min_bars: usize,
    /// Number of universe entries screened, taken from the front
    pub sample_size: usize,
    /// History requested per ticker
    pub lookback: Lookback,
    /// Look up the next earnings date of each candidate
    pub enable_earnings_check: bool,
    /// Search news for catalyst keywords for each candidate
    pub enable_news_check: bool,
    /// Days ahead an earnings date counts as "soon"
    pub earnings_window_days: u32,
    /// Tickers processed concurrently
    pub max_concurrency: usize,
    /// Stop the batch after this many seconds and keep partial results
    pub batch_timeout_secs: Option<u64>,
    /// Indicator periods
    pub indicators: IndicatorPeriods,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            price_bounds: PriceBounds::default(),
            min_score: 3,
            min_bars: DEFAULT_MIN_BARS,
            sample_size: 500,
            lookback: Lookback::SixMonths,
            enable_earnings_check: true,
            enable_news_check: true,
            earnings_window_days: 7,
            max_concurrency: 8,
            batch_timeout_secs: None,
            indicators: IndicatorPeriods::default(),
        }
    }
}

impl ScreenerConfig {
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ScreenerError> {
        let PriceBounds { low, high } = self.price_bounds;
        if !low.is_finite() || !high.is_finite() || low < 0.0 {
            return Err(ScreenerError::Config(format!(
                "price bounds must be finite and non-negative, got ({}, {})",
                low, high
            )));
        }
        if low >= high {
            return Err(ScreenerError::Config(format!(
                "price lower bound ({}) must be below upper bound ({})",
                low, high
            )));
        }
        if self.sample_size == 0 {
            return Err(ScreenerError::Config("sample_size must be at least 1".into()));
        }
        if self.max_concurrency == 0 {
            return Err(ScreenerError::Config("max_concurrency must be at least 1".into()));
        }
        if self.min_score > 4 {
            return Err(ScreenerError::Config(format!(
                "min_score must be between 0 and 4, got {}",
                self.min_score
            )));
        }
        if self.batch_timeout_secs == Some(0) {
            return Err(ScreenerError::Config("batch_timeout_secs must be positive".into()));
        }

        let engine = IndicatorEngine::new(self.indicators, self.min_bars)?;
        if engine.required_bars() > self.min_bars {
            return Err(ScreenerError::Config(format!(
                "min_bars ({}) is below the {} bars the indicator periods need",
                self.min_bars,
                engine.required_bars()
            )));
        }

        Ok(())
    }
}
