//! Summary Statistics
//!
//! Describes one group of timing samples. With only a few trials per sweep
//! point every sample counts, so nothing is discarded as an outlier.

use crate::percentiles::compute_percentiles;
use serde::{Deserialize, Serialize};

/// Summary of one sample group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of samples
    pub sample_count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
    /// Sample standard deviation (n - 1); 0.0 below two samples
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 90th percentile
    pub p90: f64,
}

impl SummaryStatistics {
    /// Coefficient of variation in percent
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }

    /// Spread of the middle half of the samples
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }

    /// Whether the spread stays below `cv_threshold` percent
    pub fn is_stable(&self, cv_threshold: f64) -> bool {
        self.coefficient_of_variation() < cv_threshold
    }
}

/// Summarize a sample group; all fields are zero for an empty group
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics {
            sample_count: 0,
            mean: 0.0,
            median: 0.0,
            p25: 0.0,
            p75: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            p90: 0.0,
        };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let percentiles = compute_percentiles(&sorted);

    SummaryStatistics {
        sample_count: n,
        mean,
        median: percentiles.p50,
        p25: percentiles.p25,
        p75: percentiles.p75,
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
        p90: percentiles.p90,
    }
}
