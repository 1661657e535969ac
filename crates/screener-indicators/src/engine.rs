//! Per-ticker indicator snapshots.

use crate::momentum::{Macd, Rsi};
use crate::trend::Adx;
use crate::volume::VolumeAverage;
use screener_core::error::IndicatorError;
use screener_core::traits::{HlcIndicator, Indicator, MultiOutputIndicator};
use screener_core::types::BarSeries;
use serde::{Deserialize, Serialize};

/// Minimum daily bars a ticker needs before it is scored.
pub const DEFAULT_MIN_BARS: usize = 30;

/// Indicator periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub adx: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            adx: 14,
        }
    }
}

impl IndicatorPeriods {
    /// Check the periods describe valid indicators.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.rsi == 0 || self.adx == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI and ADX periods must be greater than 0".into(),
            ));
        }
        if self.macd_fast == 0 || self.macd_signal == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast period ({}) must be less than slow period ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

/// Indicator values of the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// RSI, 0 to 100
    pub rsi: f64,
    /// MACD line
    pub macd: f64,
    /// MACD signal line
    pub macd_signal: f64,
    /// ADX, 0 to 100
    pub adx: f64,
    /// Volume of the latest bar
    pub latest_volume: f64,
    /// Mean volume over the whole retrieved window
    pub average_volume: f64,
}

impl IndicatorSnapshot {
    /// Whether the MACD line sits above its signal line.
    pub fn macd_above_signal(&self) -> bool {
        self.macd > self.macd_signal
    }
}

/// Computes [`IndicatorSnapshot`]s from daily bar series.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    rsi: Rsi,
    macd: Macd,
    adx: Adx,
    volume: VolumeAverage,
    min_bars: usize,
}

impl IndicatorEngine {
    /// Create an engine with the given periods and history floor.
    ///
    /// # Errors
    /// Invalid periods are rejected before any indicator is built.
    pub fn new(periods: IndicatorPeriods, min_bars: usize) -> Result<Self, IndicatorError> {
        periods.validate()?;
        Ok(Self {
            rsi: Rsi::new(periods.rsi),
            macd: Macd::with_periods(periods.macd_fast, periods.macd_slow, periods.macd_signal),
            adx: Adx::new(periods.adx),
            volume: VolumeAverage::new(),
            min_bars,
        })
    }

    /// Bars needed before every indicator is defined.
    pub fn required_bars(&self) -> usize {
        self.min_bars
            .max(Indicator::period(&self.rsi))
            .max(MultiOutputIndicator::period(&self.macd))
            .max(HlcIndicator::period(&self.adx))
    }

    /// Compute the snapshot of the series' latest bar.
    ///
    /// # Errors
    /// [`IndicatorError::InsufficientData`] when the series is shorter than
    /// the history floor or than any indicator's own requirement.
    pub fn compute(&self, series: &BarSeries) -> Result<IndicatorSnapshot, IndicatorError> {
        if series.len() < self.min_bars {
            return Err(IndicatorError::InsufficientData {
                indicator: "history".to_string(),
                required: self.min_bars,
                available: series.len(),
            });
        }

        let closes = series.closes();

        self.rsi.validate_data(&closes)?;
        let rsi = self.rsi.calculate(&closes).last().copied();

        self.macd.validate_data(&closes)?;
        let macd = self.macd.calculate(&closes).last().copied();

        self.adx.validate_data(series.len())?;
        let adx = self
            .adx
            .calculate(&series.highs(), &series.lows(), &closes)
            .last()
            .copied();

        let volume = self.volume.calculate(&series.volumes());

        match (rsi, macd, adx, volume) {
            (Some(rsi), Some(macd), Some(adx), Some(volume)) => Ok(IndicatorSnapshot {
                rsi,
                macd: macd.macd,
                macd_signal: macd.signal,
                adx: adx.adx,
                latest_volume: volume.latest,
                average_volume: volume.average,
            }),
            _ => Err(IndicatorError::InsufficientData {
                indicator: "snapshot".to_string(),
                required: self.required_bars(),
                available: series.len(),
            }),
        }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            rsi: Rsi::default(),
            macd: Macd::default(),
            adx: Adx::default(),
            volume: VolumeAverage::new(),
            min_bars: DEFAULT_MIN_BARS,
        }
    }
}
