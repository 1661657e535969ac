//! Trend strength indicators.

use screener_core::traits::HlcIndicator;
use serde::{Deserialize, Serialize};

/// ADX output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxOutput {
    /// Average directional index
    pub adx: f64,
    /// Positive directional indicator (+DI)
    pub plus_di: f64,
    /// Negative directional indicator (-DI)
    pub minus_di: f64,
}

/// Average Directional Index (ADX), Wilder's definition.
///
/// True range and directional movement are Wilder-smoothed over `period`
/// bars, giving one DX per bar from index `period`. The first ADX is the
/// mean of the first `period` DX values, so output starts at index
/// `2 * period - 1`.
#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
}

impl Adx {
    /// Create a new ADX indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn directional(plus_dm: f64, minus_dm: f64, tr: f64) -> (f64, f64, f64) {
        if tr == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let plus_di = 100.0 * plus_dm / tr;
        let minus_di = 100.0 * minus_dm / tr;
        let di_sum = plus_di + minus_di;
        let dx = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        };
        (plus_di, minus_di, dx)
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14)
    }
}

impl HlcIndicator for Adx {
    type Output = AdxOutput;

    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<AdxOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.period() {
            return vec![];
        }

        let mut tr = Vec::with_capacity(len - 1);
        let mut plus_dm = Vec::with_capacity(len - 1);
        let mut minus_dm = Vec::with_capacity(len - 1);

        for i in 1..len {
            let up_move = high[i] - high[i - 1];
            let down_move = low[i - 1] - low[i];

            plus_dm.push(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            minus_dm.push(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });

            let high_low = high[i] - low[i];
            let high_close = (high[i] - close[i - 1]).abs();
            let low_close = (low[i] - close[i - 1]).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }

        let p = self.period;
        let period_f64 = p as f64;

        // Wilder's running sums: first is the plain sum of `period` values
        let mut tr_sum: f64 = tr[..p].iter().sum();
        let mut plus_sum: f64 = plus_dm[..p].iter().sum();
        let mut minus_sum: f64 = minus_dm[..p].iter().sum();

        let mut directional = Vec::with_capacity(tr.len() - p + 1);
        directional.push(Self::directional(plus_sum, minus_sum, tr_sum));

        for i in p..tr.len() {
            tr_sum = tr_sum - tr_sum / period_f64 + tr[i];
            plus_sum = plus_sum - plus_sum / period_f64 + plus_dm[i];
            minus_sum = minus_sum - minus_sum / period_f64 + minus_dm[i];
            directional.push(Self::directional(plus_sum, minus_sum, tr_sum));
        }

        let mut result = Vec::with_capacity(directional.len() - p + 1);

        let mut adx: f64 = directional[..p].iter().map(|d| d.2).sum::<f64>() / period_f64;
        let (plus_di, minus_di, _) = directional[p - 1];
        result.push(AdxOutput {
            adx,
            plus_di,
            minus_di,
        });

        for &(plus_di, minus_di, dx) in &directional[p..] {
            adx = (adx * (period_f64 - 1.0) + dx) / period_f64;
            result.push(AdxOutput {
                adx,
                plus_di,
                minus_di,
            });
        }

        result
    }

    fn period(&self) -> usize {
        2 * self.period
    }

    fn name(&self) -> &str {
        "ADX"
    }
}
