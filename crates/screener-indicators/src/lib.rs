//! Technical indicators for the screener.
//!
//! This crate provides the indicators the scoring rule reads:
//! - Exponential moving average (EMA)
//! - Momentum indicators (RSI, MACD)
//! - Trend strength (ADX)
//! - Volume statistics over the retrieved window
//!
//! [`IndicatorEngine`] combines them into an [`IndicatorSnapshot`] of the
//! latest bar.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod trend;
pub mod volume;

pub use engine::{IndicatorEngine, IndicatorPeriods, IndicatorSnapshot, DEFAULT_MIN_BARS};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::Ema;
pub use trend::{Adx, AdxOutput};
pub use volume::{VolumeAverage, VolumeStats};
