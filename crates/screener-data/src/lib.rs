//! Data sources for the screener.
//!
//! Offline sources read CSV files; online sources talk to the NASDAQ Trader
//! symbol directories, Yahoo Finance and NewsData.io. Any [`BarSource`] or
//! [`UniverseSource`] can be wrapped with a TTL cache.
//!
//! [`BarSource`]: screener_core::BarSource
//! [`UniverseSource`]: screener_core::UniverseSource

mod cache;
mod cached;
mod csv_source;
mod file_universe;
mod http;
mod nasdaq;
mod newsdata;
mod yahoo;

pub use cache::{ResponseCache, TtlCache};
pub use cached::{CachedBarSource, CachedUniverse};
pub use csv_source::CsvBarSource;
pub use file_universe::FileUniverse;
pub use http::HttpSettings;
pub use nasdaq::{NasdaqTraderUniverse, NASDAQ_LISTED_URL, OTHER_LISTED_URL};
pub use newsdata::{NewsDataConfig, NewsDataSource, NEWSDATA_BASE_URL};
pub use yahoo::{YahooFinance, YAHOO_BASE_URL, YAHOO_SESSION_URL};

use std::collections::HashSet;

/// Drop blank and repeated symbols, keeping the first occurrence.
pub(crate) fn dedup_symbols(symbols: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
