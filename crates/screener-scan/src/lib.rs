//! Penny stock screening.
//!
//! This crate holds the stages of a scan:
//! - [`PennyFilter`] narrows a universe by latest close
//! - [`Scorer`] awards one point per satisfied indicator condition
//! - [`CatalystDetector`] flags upcoming earnings and keyword news
//! - [`ScreeningPipeline`] runs them over a batch and ranks the result

mod batch;
pub mod catalyst;
pub mod config;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod scorer;

pub use catalyst::{find_catalyst, in_earnings_window, CatalystDetector, CatalystInfo, CATALYST_KEYWORDS};
pub use config::{PriceBounds, ScreenerConfig};
pub use export::{export_csv, write_csv};
pub use filter::{FilterOutcome, PennyFilter};
pub use pipeline::ScreeningPipeline;
pub use report::{ScanReport, ScanStats, SkipStage, SkippedTicker};
pub use scorer::{Highlight, ScoredCandidate, Scorer, ScoringRules, MAX_SCORE};
