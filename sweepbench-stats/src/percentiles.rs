//! Percentile Computation
//!
//! Trial counts are small (a handful of repeats per sweep point), so
//! percentiles interpolate linearly between nearest ranks instead of
//! snapping to a sample.

use serde::{Deserialize, Serialize};

/// Percentiles reported per sample group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
}

/// Percentile of an already sorted slice; 0.0 when empty
fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let p = (percentile / 100.0).clamp(0.0, 1.0);
            let rank = p * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;

            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// Compute the standard percentile set from an already sorted slice
pub fn compute_percentiles(sorted: &[f64]) -> Percentiles {
    debug_assert!(
        sorted.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
        "samples must be sorted"
    );

    Percentiles {
        p25: percentile_of_sorted(sorted, 25.0),
        p50: percentile_of_sorted(sorted, 50.0),
        p75: percentile_of_sorted(sorted, 75.0),
        p90: percentile_of_sorted(sorted, 90.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert!((compute_percentiles(&[1.0, 3.0, 5.0]).p50 - 3.0).abs() < 1e-12);
        assert!((compute_percentiles(&[1.0, 2.0, 3.0, 4.0]).p50 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation() {
        let samples: Vec<f64> = (1..=5).map(|x| x as f64).collect();
        // rank = 0.9 * 4 = 3.6 -> 4.0 + 0.6 * (5.0 - 4.0)
        assert!((compute_percentiles(&samples).p90 - 4.6).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_percentile_clamped() {
        let samples = vec![1.0, 2.0, 3.0];
        assert_eq!(percentile_of_sorted(&samples, 150.0), 3.0);
        assert_eq!(percentile_of_sorted(&samples, -10.0), 1.0);
    }

    #[test]
    fn test_single_and_empty() {
        let single = compute_percentiles(&[42.0]);
        assert_eq!(single.p25, 42.0);
        assert_eq!(single.p90, 42.0);
        assert_eq!(compute_percentiles(&[]).p50, 0.0);
    }

    #[test]
    fn test_percentile_set() {
        let samples: Vec<f64> = (0..=100).map(|x| x as f64).collect();
        let p = compute_percentiles(&samples);
        assert!((p.p25 - 25.0).abs() < 1e-9);
        assert!((p.p50 - 50.0).abs() < 1e-9);
        assert!((p.p75 - 75.0).abs() < 1e-9);
        assert!((p.p90 - 90.0).abs() < 1e-9);
    }
}
