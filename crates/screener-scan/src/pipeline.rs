//! Screening pipeline.

use crate::batch::collect_until;
use crate::catalyst::CatalystDetector;
use crate::config::ScreenerConfig;
use crate::filter::PennyFilter;
use crate::report::{ScanReport, ScanStats, SkipStage, SkippedTicker};
use crate::scorer::{ScoredCandidate, Scorer};
use chrono::{Local, NaiveDate};
use futures::{stream, StreamExt};
use screener_core::error::{ScreenerError, ScreenerResult};
use screener_core::traits::{BarSource, EarningsSource, NewsSource, UniverseSource};
use screener_core::types::BarSeries;
use screener_indicators::IndicatorEngine;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Runs the universe through the penny filter, indicator engine, scorer
/// and catalyst detector.
///
/// Per-ticker failures are recorded in the report and never abort the run.
/// Only a universe that cannot be listed fails the whole run.
pub struct ScreeningPipeline {
    config: ScreenerConfig,
    universe: Arc<dyn UniverseSource>,
    bars: Arc<dyn BarSource>,
    engine: IndicatorEngine,
    scorer: Scorer,
    catalysts: CatalystDetector,
}

impl ScreeningPipeline {
    /// Create a pipeline without catalyst sources.
    ///
    /// # Errors
    /// [`ScreenerError::Config`] or [`ScreenerError::Indicator`] when the
    /// configuration does not validate.
    pub fn new(
        config: ScreenerConfig,
        universe: Arc<dyn UniverseSource>,
        bars: Arc<dyn BarSource>,
    ) -> ScreenerResult<Self> {
        config.validate()?;
        let engine = IndicatorEngine::new(config.indicators, config.min_bars)?;
        let scorer = Scorer::with_min_score(config.min_score);
        let catalysts = CatalystDetector::new(config.earnings_window_days);

        Ok(Self {
            config,
            universe,
            bars,
            engine,
            scorer,
            catalysts,
        })
    }

    /// Attach an earnings calendar; ignored when the earnings check is disabled.
    pub fn with_earnings(mut self, source: Arc<dyn EarningsSource>) -> Self {
        if self.config.enable_earnings_check {
            self.catalysts = self.catalysts.with_earnings(source);
        }
        self
    }

    /// Attach a news search; ignored when the news check is disabled.
    pub fn with_news(mut self, source: Arc<dyn NewsSource>) -> Self {
        if self.config.enable_news_check {
            self.catalysts = self.catalysts.with_news(source);
        }
        self
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Whether any catalyst source is attached, so reports carry catalyst data.
    pub fn catalysts_enabled(&self) -> bool {
        self.catalysts.is_enabled()
    }

    /// Screen with today's local date as the earnings reference.
    pub async fn run(&self) -> ScreenerResult<ScanReport> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Screen with `today` as the earnings reference.
    pub async fn run_on(&self, today: NaiveDate) -> ScreenerResult<ScanReport> {
        let deadline = self.config.batch_timeout().map(|t| Instant::now() + t);

        let universe = self
            .universe
            .list_universe()
            .await
            .map_err(|e| ScreenerError::UniverseUnavailable(format!("{}: {}", self.universe.name(), e)))?;
        let sample: Vec<String> = universe
            .iter()
            .take(self.config.sample_size)
            .cloned()
            .collect();
        info!(
            universe = universe.len(),
            sampled = sample.len(),
            source = self.universe.name(),
            "Universe loaded"
        );

        let mut report = ScanReport {
            stats: ScanStats {
                universe_size: universe.len(),
                sampled: sample.len(),
                ..Default::default()
            },
            ..Default::default()
        };

        let filter = PennyFilter::new(self.bars.clone(), self.config.price_bounds)
            .with_concurrency(self.config.max_concurrency);
        let filtered = filter.filter_until(&sample, deadline).await;
        report.stats.penny_count = filtered.kept.len();
        report.skipped.extend(filtered.skipped);
        info!(
            penny = filtered.kept.len(),
            low = self.config.price_bounds.low,
            high = self.config.price_bounds.high,
            "Penny filter complete"
        );

        if filtered.timed_out {
            warn!("Batch timeout elapsed during the penny filter");
            report.timed_out = true;
            return Ok(report);
        }

        let analyses = stream::iter(&filtered.kept)
            .map(|ticker| self.analyze(ticker, today))
            .buffered(self.config.max_concurrency);
        let (results, timed_out) = collect_until(analyses, deadline).await;
        if timed_out {
            warn!(
                completed = results.len(),
                total = filtered.kept.len(),
                "Batch timeout elapsed during analysis"
            );
        }
        report.timed_out = timed_out;

        for result in results {
            match result {
                Ok(candidate) => {
                    report.stats.analyzed += 1;
                    if self.scorer.is_retained(candidate.score) {
                        report.candidates.push(candidate);
                    }
                }
                Err(skip) => report.skipped.push(skip),
            }
        }

        // Stable: equal scores keep universe order
        report.candidates.sort_by(|a, b| b.score.cmp(&a.score));
        report.stats.candidates = report.candidates.len();

        info!(
            analyzed = report.stats.analyzed,
            candidates = report.stats.candidates,
            skipped = report.skipped.len(),
            "Screening complete"
        );

        Ok(report)
    }

    /// Score one ticker, running the catalyst checks only if it is retained.
    async fn analyze(&self, ticker: &str, today: NaiveDate) -> Result<ScoredCandidate, SkippedTicker> {
        let mut candidate = self.score_ticker(ticker).await?;
        if self.scorer.is_retained(candidate.score) && self.catalysts.is_enabled() {
            candidate.catalyst = self.catalysts.detect(ticker, today).await;
        }
        Ok(candidate)
    }

    /// Score one ticker and run every catalyst check regardless of score.
    pub async fn inspect(&self, ticker: &str, today: NaiveDate) -> Result<ScoredCandidate, SkippedTicker> {
        let mut candidate = self.score_ticker(ticker).await?;
        candidate.catalyst = self.catalysts.detect(ticker, today).await;
        Ok(candidate)
    }

    /// Fetch history, compute the snapshot and score it.
    async fn score_ticker(&self, ticker: &str) -> Result<ScoredCandidate, SkippedTicker> {
        let bars = self
            .bars
            .daily_bars(ticker, self.config.lookback)
            .await
            .map_err(|e| {
                debug!(ticker, error = %e, "History unavailable");
                SkippedTicker::new(ticker, SkipStage::History, e.to_string())
            })?;

        let series = BarSeries::new(ticker, bars);
        let indicators = self.engine.compute(&series).map_err(|e| {
            debug!(ticker, bars = series.len(), error = %e, "Skipping ticker");
            SkippedTicker::new(ticker, SkipStage::InsufficientHistory, e.to_string())
        })?;

        let price = series.last().map(|b| b.close).ok_or_else(|| {
            SkippedTicker::new(ticker, SkipStage::InsufficientHistory, "no bars")
        })?;
        let score = self.scorer.score(&indicators);
        debug!(ticker, score, rsi = indicators.rsi, adx = indicators.adx, "Scored");

        Ok(ScoredCandidate {
            ticker: ticker.to_string(),
            price,
            indicators,
            catalyst: Default::default(),
            score,
        })
    }
}
