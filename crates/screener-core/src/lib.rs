//! Core types and traits for the penny stock screener.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Lookback)
//! - News article records
//! - Collaborator traits for universe, price, earnings and news sources
//! - Indicator traits shared by the indicator engine

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, ScreenerError, ScreenerResult};
pub use traits::*;
pub use types::*;
