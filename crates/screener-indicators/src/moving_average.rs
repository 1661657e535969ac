//! Moving average indicators.

use screener_core::traits::Indicator;

/// Exponential Moving Average (EMA).
///
/// Seeded with the first input, so every input yields one output. MACD
/// relies on this to be defined as soon as its slow period is covered.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let one_minus_mult = 1.0 - self.multiplier;
        let mut result = Vec::with_capacity(data.len());
        let mut ema = first;
        result.push(ema);
        for &price in rest {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }
        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
