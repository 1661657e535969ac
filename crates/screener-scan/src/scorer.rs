//! Point scoring of indicator snapshots.

use crate::catalyst::CatalystInfo;
use screener_indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};

/// Highest attainable score.
pub const MAX_SCORE: u8 = 4;

/// Thresholds of the scoring conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// RSI must be strictly below this
    pub rsi_below: f64,
    /// ADX must be strictly above this
    pub adx_above: f64,
    /// Minimum score for a ticker to be retained
    pub min_score: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            rsi_below: 35.0,
            adx_above: 20.0,
            min_score: 3,
        }
    }
}

/// Scores snapshots one point per satisfied condition:
///
/// | Condition                     | Points |
/// |-------------------------------|--------|
/// | RSI < 35                      | +1     |
/// | MACD > signal                 | +1     |
/// | ADX > 20                      | +1     |
/// | latest volume > mean volume   | +1     |
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    rules: ScoringRules,
}

impl Scorer {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// Default thresholds with a custom minimum score.
    pub fn with_min_score(min_score: u8) -> Self {
        Self::new(ScoringRules {
            min_score,
            ..Default::default()
        })
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// The four conditions, in table order.
    pub fn conditions(&self, snapshot: &IndicatorSnapshot) -> [bool; 4] {
        [
            snapshot.rsi < self.rules.rsi_below,
            snapshot.macd_above_signal(),
            snapshot.adx > self.rules.adx_above,
            snapshot.latest_volume > snapshot.average_volume,
        ]
    }

    /// Number of satisfied conditions, 0 to 4.
    pub fn score(&self, snapshot: &IndicatorSnapshot) -> u8 {
        self.conditions(snapshot).iter().filter(|&&met| met).count() as u8
    }

    pub fn is_retained(&self, score: u8) -> bool {
        score >= self.rules.min_score
    }
}

/// Row highlight category, by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    NewsCatalyst,
    EarningsSoon,
    Strong,
    Moderate,
    None,
}

/// A ticker that was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub ticker: String,
    /// Close of the latest bar
    pub price: f64,
    pub indicators: IndicatorSnapshot,
    pub catalyst: CatalystInfo,
    pub score: u8,
}

impl ScoredCandidate {
    pub fn highlight(&self) -> Highlight {
        if self.catalyst.news_catalyst {
            Highlight::NewsCatalyst
        } else if self.catalyst.earnings_soon {
            Highlight::EarningsSoon
        } else if self.score >= MAX_SCORE {
            Highlight::Strong
        } else if self.score == 3 {
            Highlight::Moderate
        } else {
            Highlight::None
        }
    }
}
