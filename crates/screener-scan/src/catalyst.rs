//! Earnings and news catalyst detection.
//!
//! Both checks are advisory. A collaborator failure is logged and reads as
//! "no catalyst"; it never removes a ticker from the results.

use chrono::{Duration, NaiveDate};
use screener_core::traits::{EarningsSource, NewsSource};
use screener_core::types::NewsArticle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Keywords that mark a biotech or regulatory news catalyst.
pub const CATALYST_KEYWORDS: &[&str] = &[
    "FDA",
    "phase 2",
    "clinical trial",
    "approval",
    "data readout",
    "pdufa",
];

/// Catalyst signals of one ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalystInfo {
    /// Next earnings date falls inside the window
    pub earnings_soon: bool,
    /// Next earnings date, whenever one was retrieved
    pub earnings_date: Option<NaiveDate>,
    /// A recent article matched a catalyst keyword
    pub news_catalyst: bool,
    /// Title of the first matching article
    pub headline: Option<String>,
}

/// Whether `date` lies in `[today, today + window_days]`.
pub fn in_earnings_window(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    date >= today && date <= today + Duration::days(i64::from(window_days))
}

/// First article whose title and description mention a catalyst keyword,
/// ignoring case.
pub fn find_catalyst(articles: &[NewsArticle]) -> Option<&NewsArticle> {
    let keywords: Vec<String> = CATALYST_KEYWORDS.iter().map(|k| k.to_lowercase()).collect();
    articles.iter().find(|article| {
        let text = article.searchable_text().to_lowercase();
        keywords.iter().any(|k| text.contains(k.as_str()))
    })
}

/// Runs the earnings and news checks that have a source attached.
#[derive(Clone)]
pub struct CatalystDetector {
    earnings: Option<Arc<dyn EarningsSource>>,
    news: Option<Arc<dyn NewsSource>>,
    window_days: u32,
}

impl Default for CatalystDetector {
    fn default() -> Self {
        Self::new(7)
    }
}

impl CatalystDetector {
    pub fn new(window_days: u32) -> Self {
        Self {
            earnings: None,
            news: None,
            window_days,
        }
    }

    pub fn with_earnings(mut self, source: Arc<dyn EarningsSource>) -> Self {
        self.earnings = Some(source);
        self
    }

    pub fn with_news(mut self, source: Arc<dyn NewsSource>) -> Self {
        self.news = Some(source);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.earnings.is_some() || self.news.is_some()
    }

    /// Run every attached check for `ticker`.
    pub async fn detect(&self, ticker: &str, today: NaiveDate) -> CatalystInfo {
        let (earnings_soon, earnings_date) = self.check_earnings(ticker, today).await;
        let (news_catalyst, headline) = self.check_news(ticker).await;

        CatalystInfo {
            earnings_soon,
            earnings_date,
            news_catalyst,
            headline,
        }
    }

    /// Earnings-soon flag and the retrieved date.
    pub async fn check_earnings(&self, ticker: &str, today: NaiveDate) -> (bool, Option<NaiveDate>) {
        let Some(source) = &self.earnings else {
            return (false, None);
        };

        match source.next_earnings_date(ticker).await {
            Ok(Some(date)) => (in_earnings_window(date, today, self.window_days), Some(date)),
            Ok(None) => (false, None),
            Err(e) => {
                warn!(ticker, source = source.name(), error = %e, "Earnings lookup failed");
                (false, None)
            }
        }
    }

    /// News-catalyst flag and the matching headline.
    pub async fn check_news(&self, ticker: &str) -> (bool, Option<String>) {
        let Some(source) = &self.news else {
            return (false, None);
        };

        match source.search_news(ticker).await {
            Ok(articles) => match find_catalyst(&articles) {
                Some(article) => {
                    debug!(ticker, headline = %article.title, "News catalyst found");
                    (true, Some(article.title.clone()))
                }
                None => (false, None),
            },
            Err(e) => {
                warn!(ticker, source = source.name(), error = %e, "News search failed");
                (false, None)
            }
        }
    }
}
