//! Core traits for the screener.

mod data_source;
mod indicator;

pub use data_source::{BarSource, EarningsSource, NewsSource, UniverseSource};
pub use indicator::{HlcIndicator, Indicator, MultiOutputIndicator};
