#![warn(missing_docs)]
//! SweepBench Statistics
//!
//! Small-sample descriptive statistics for timing groups:
//! - Percentiles with linear interpolation between ranks
//! - Summary statistics (mean, quartiles, spread, extremes, stability)

mod percentiles;
mod summary;

pub use percentiles::{Percentiles, compute_percentiles};
pub use summary::{SummaryStatistics, compute_summary};
