//! Core data types for the screener.

mod lookback;
mod news;
mod ohlcv;

pub use lookback::Lookback;
pub use news::NewsArticle;
pub use ohlcv::{Bar, BarSeries};
