//! Volume statistics.

use crate::simd::mean_simd;
use serde::{Deserialize, Serialize};

/// Latest volume against the window average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    /// Volume of the most recent bar
    pub latest: f64,
    /// Arithmetic mean over every bar supplied, latest included
    pub average: f64,
}

/// Average volume over the entire retrieved window.
///
/// There is no period; the mean spans every bar the caller retrieved.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeAverage;

impl VolumeAverage {
    /// Create a new volume average.
    pub fn new() -> Self {
        Self
    }

    /// Compute latest and average volume. `None` when `volumes` is empty.
    pub fn calculate(&self, volumes: &[f64]) -> Option<VolumeStats> {
        let latest = *volumes.last()?;
        let average = mean_simd(volumes)?;
        Some(VolumeStats { latest, average })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_spans_whole_window() {
        let mut volumes = vec![1000.0; 29];
        volumes.push(4000.0);

        let stats = VolumeAverage::new().calculate(&volumes).unwrap();
        assert_eq!(stats.latest, 4000.0);
        assert!((stats.average - 1100.0).abs() < 1e-9);
        assert!(stats.latest > stats.average);
    }

    #[test]
    fn test_equal_volume_is_not_above_average() {
        let stats = VolumeAverage::new().calculate(&[500.0; 10]).unwrap();
        assert_eq!(stats.latest, stats.average);
    }

    #[test]
    fn test_empty_window() {
        assert!(VolumeAverage::new().calculate(&[]).is_none());
    }
}
