//! Collaborator traits for the data the screener consumes.

use crate::error::DataError;
use crate::types::{Bar, Lookback, NewsArticle};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of the ticker universe to screen.
#[async_trait]
pub trait UniverseSource: Send + Sync {
    /// List ticker symbols.
    ///
    /// The order is preserved by the screener, so any bias in it
    /// (typically alphabetical) carries into sampling.
    async fn list_universe(&self) -> Result<Vec<String>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Source of daily price history.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch daily bars.
    ///
    /// # Arguments
    /// * `ticker` - The symbol to fetch
    /// * `lookback` - How far back to reach from the latest session
    ///
    /// # Returns
    /// Bars ordered from oldest to newest; may be empty
    async fn daily_bars(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, DataError>;

    /// Get the most recent daily close.
    ///
    /// Uses a five day window so weekends and holidays still yield
    /// the last completed session.
    async fn latest_close(&self, ticker: &str) -> Result<Option<f64>, DataError> {
        let bars = self.daily_bars(ticker, Lookback::FiveDays).await?;
        Ok(bars.iter().max_by_key(|b| b.timestamp).map(|b| b.close))
    }

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Source of upcoming earnings dates.
#[async_trait]
pub trait EarningsSource: Send + Sync {
    /// Get the next scheduled earnings date, if one is published.
    ///
    /// When the provider publishes a date range, the earliest date is returned.
    async fn next_earnings_date(&self, ticker: &str) -> Result<Option<NaiveDate>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// News search.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search recent news articles.
    async fn search_news(&self, query: &str) -> Result<Vec<NewsArticle>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
