//! SIMD-optimized reductions.
//!
//! These use the `wide` crate for portable SIMD operations and back the
//! whole-window volume statistics.

use wide::f64x4;

/// SIMD-optimized sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        simd_sum += values;
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// SIMD-optimized arithmetic mean. `None` for an empty slice.
pub fn mean_simd(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(sum_simd(data) / data.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_simd() {
        let data: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        assert!((sum_simd(&data) - 55.0).abs() < 1e-10);
    }

    #[test]
    fn test_sum_simd_short_slice() {
        assert!((sum_simd(&[1.5, 2.5]) - 4.0).abs() < 1e-10);
        assert_eq!(sum_simd(&[]), 0.0);
    }

    #[test]
    fn test_mean_simd() {
        let data = vec![1000.0, 2000.0, 3000.0, 4000.0, 5000.0];
        assert!((mean_simd(&data).unwrap() - 3000.0).abs() < 1e-10);
        assert!(mean_simd(&[]).is_none());
    }
}
