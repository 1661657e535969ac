//! Momentum indicators.

use crate::moving_average::Ema;
use screener_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                }
            })
            .unzip();

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 && gain == 0.0 {
                    // No movement at all: neutral
                    50.0
                } else if loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// All three EMAs are seeded with their first input and run over the whole
/// series, so the signal line exists as soon as the slow EMA has seen
/// `slow_period` closes. Output starts at index `slow_period - 1`.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    slow_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
            slow_period: slow,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.slow_period {
            return vec![];
        }

        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = self.signal.calculate(&macd_line);

        let offset = self.slow_period - 1;
        macd_line[offset..]
            .iter()
            .zip(signal_line[offset..].iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounded() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 16);

        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_is_neutral() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[3.0; 10]);
        assert!((result.last().unwrap() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_wilder_value() {
        // One gain of 2 and four flat moves, then a loss of 1
        let rsi = Rsi::new(5);
        let data = vec![10.0, 12.0, 12.0, 12.0, 12.0, 12.0, 11.0];
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), 2);
        // First window: avg gain 0.4, avg loss 0 -> 100
        assert!((result[0] - 100.0).abs() < 1e-10);
        // avg gain = 0.4 * 4 / 5 = 0.32, avg loss = 1 / 5 = 0.2
        let expected = 100.0 - 100.0 / (1.0 + 0.32 / 0.2);
        assert!((result[1] - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        assert!(rsi.calculate(&[1.0; 14]).is_empty());
        assert_eq!(rsi.calculate(&[1.0; 15]).len(), 1);
    }

    #[test]
    fn test_macd_uptrend_above_signal() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 25);
        let last = result.last().unwrap();
        assert!(last.macd > 0.0);
        assert!(last.macd > last.signal);
        assert!((last.histogram - (last.macd - last.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_downtrend_below_signal() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        let last = *macd.calculate(&data).last().unwrap();

        assert!(last.macd < 0.0);
        assert!(last.macd < last.signal);
    }

    fn oscillating_closes() -> Vec<f64> {
        (0..60)
            .map(|i| 2.0 + 0.3 * (0.7 * i as f64).sin() + 0.01 * i as f64)
            .collect()
    }

    #[test]
    fn test_rsi_oscillating_reference_value() {
        let result = Rsi::new(14).calculate(&oscillating_closes());
        assert_eq!(result.len(), 46);
        assert!((result.last().unwrap() - 49.374835955411).abs() < 1e-9);
    }

    #[test]
    fn test_macd_oscillating_reference_value() {
        let last = *Macd::new().calculate(&oscillating_closes()).last().unwrap();
        assert!((last.macd - 0.084291200690).abs() < 1e-9);
        assert!((last.signal - 0.079120939661).abs() < 1e-9);
    }

    #[test]
    fn test_macd_defined_at_slow_period() {
        let macd = Macd::new();
        assert!(macd.calculate(&[1.0; 25]).is_empty());
        assert_eq!(macd.calculate(&[1.0; 26]).len(), 1);
    }

    #[test]
    fn test_macd_flat_is_zero() {
        let macd = Macd::with_periods(5, 10, 3);
        let last = *macd.calculate(&[7.0; 30]).last().unwrap();
        assert!(last.macd.abs() < 1e-12);
        assert!(last.signal.abs() < 1e-12);
    }
}
