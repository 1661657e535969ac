//! Scan results and counters.

use crate::scorer::{Highlight, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage at which a ticker was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    /// Latest close could not be retrieved
    PriceLookup,
    /// Latest close outside the price bounds
    PriceBounds,
    /// Daily history could not be retrieved
    History,
    /// Too few bars for the indicators
    InsufficientHistory,
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipStage::PriceLookup => "price lookup",
            SkipStage::PriceBounds => "price bounds",
            SkipStage::History => "history",
            SkipStage::InsufficientHistory => "insufficient history",
        };
        write!(f, "{}", s)
    }
}

/// A ticker that left the pipeline early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub stage: SkipStage,
    pub reason: String,
}

impl SkippedTicker {
    pub fn new(ticker: impl Into<String>, stage: SkipStage, reason: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            stage,
            reason: reason.into(),
        }
    }
}

/// Counts of tickers entering and leaving each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Tickers listed by the universe source
    pub universe_size: usize,
    /// Tickers taken from the front of the universe
    pub sampled: usize,
    /// Sampled tickers whose latest close passed the price bounds
    pub penny_count: usize,
    /// Penny stocks with enough history to be scored
    pub analyzed: usize,
    /// Scored tickers meeting the minimum score
    pub candidates: usize,
}

/// Result of one screening run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Candidates, highest score first; ties keep universe order
    pub candidates: Vec<ScoredCandidate>,
    pub stats: ScanStats,
    pub skipped: Vec<SkippedTicker>,
    /// The batch timeout elapsed before every ticker was processed
    pub timed_out: bool,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Skips recorded at `stage`.
    pub fn skipped_at(&self, stage: SkipStage) -> impl Iterator<Item = &SkippedTicker> {
        self.skipped.iter().filter(move |s| s.stage == stage)
    }

    /// Generate a summary string.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   PENNY STOCK SCREENER                     \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PIPELINE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Universe:            {}\n", self.stats.universe_size));
        s.push_str(&format!("  Sampled:             {}\n", self.stats.sampled));
        s.push_str(&format!("  Penny Stocks:        {}\n", self.stats.penny_count));
        s.push_str(&format!("  Analyzed:            {}\n", self.stats.analyzed));
        s.push_str(&format!("  Candidates:          {}\n", self.stats.candidates));
        s.push_str(&format!("  Skipped:             {}\n", self.skipped.len()));
        if self.timed_out {
            s.push_str("  Timed Out:           yes (partial results)\n");
        }
        s.push('\n');

        s.push_str("CANDIDATES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        if self.candidates.is_empty() {
            s.push_str("  No strong buy signals found among penny stocks.\n");
        } else {
            s.push_str(&format!(
                "  {:<8} {:>8} {:>7} {:>5} {:>7} {:>12}  {}\n",
                "Ticker", "Price", "RSI", "MACD", "ADX", "Volume", "Score"
            ));
            for c in &self.candidates {
                let marker = match c.highlight() {
                    Highlight::NewsCatalyst => " [news]",
                    Highlight::EarningsSoon => " [earnings]",
                    _ => "",
                };
                s.push_str(&format!(
                    "  {:<8} {:>8.4} {:>7.2} {:>5} {:>7.2} {:>12.0}  {}{}\n",
                    c.ticker,
                    c.price,
                    c.indicators.rsi,
                    if c.indicators.macd_above_signal() { "yes" } else { "no" },
                    c.indicators.adx,
                    c.indicators.latest_volume,
                    c.score,
                    marker
                ));
                if let Some(headline) = &c.catalyst.headline {
                    s.push_str(&format!("           {}\n", headline));
                }
            }
        }
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalyst::CatalystInfo;
    use screener_indicators::IndicatorSnapshot;

    fn candidate(ticker: &str, score: u8, catalyst: CatalystInfo) -> ScoredCandidate {
        ScoredCandidate {
            ticker: ticker.to_string(),
            price: 1.25,
            indicators: IndicatorSnapshot {
                rsi: 30.0,
                macd: 0.02,
                macd_signal: 0.01,
                adx: 25.0,
                latest_volume: 250_000.0,
                average_volume: 100_000.0,
            },
            catalyst,
            score,
        }
    }

    #[test]
    fn test_report_summary() {
        let report = ScanReport {
            candidates: vec![
                candidate("ABCD", 4, CatalystInfo::default()),
                candidate(
                    "WXYZ",
                    3,
                    CatalystInfo {
                        news_catalyst: true,
                        headline: Some("WXYZ wins FDA approval".to_string()),
                        ..Default::default()
                    },
                ),
            ],
            stats: ScanStats {
                universe_size: 12,
                sampled: 10,
                penny_count: 4,
                analyzed: 3,
                candidates: 2,
            },
            skipped: vec![SkippedTicker::new("QQQQ", SkipStage::History, "no data")],
            timed_out: false,
        };

        let summary = report.summary();
        assert!(summary.contains("Penny Stocks:        4"));
        assert!(summary.contains("ABCD"));
        assert!(summary.contains("[news]"));
        assert!(summary.contains("WXYZ wins FDA approval"));
        assert!(!summary.contains("Timed Out"));
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::default();
        assert!(report.is_empty());
        assert!(report.summary().contains("No strong buy signals"));
    }

    #[test]
    fn test_skipped_at() {
        let report = ScanReport {
            skipped: vec![
                SkippedTicker::new("A", SkipStage::PriceBounds, "10.00"),
                SkippedTicker::new("B", SkipStage::History, "timeout"),
                SkippedTicker::new("C", SkipStage::PriceBounds, "7.50"),
            ],
            ..Default::default()
        };

        let tickers: Vec<_> = report
            .skipped_at(SkipStage::PriceBounds)
            .map(|s| s.ticker.as_str())
            .collect();
        assert_eq!(tickers, vec!["A", "C"]);
    }

    #[test]
    fn test_to_json() {
        let report = ScanReport::default();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"timed_out\": false"));
    }
}
