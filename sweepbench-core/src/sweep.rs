//! Sweep Generator
//!
//! A sweep is an integer percentage range `[start, end)` walked in `step`
//! increments. Each point carries the parameter handed to workflows
//! (`percent / 100.0`) and its display label (`"{percent}%"`).

use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Default number of independent timing trials per sweep point
pub const DEFAULT_REPEAT: usize = 5;

/// Default number of workflow executions inside one trial
pub const DEFAULT_NUMBER: usize = 3;

/// Default first percentage of the sweep
pub const DEFAULT_RANGE_START: i64 = 20;

/// Default exclusive upper bound of the sweep (covers 100%)
pub const DEFAULT_RANGE_END: i64 = 101;

/// Default percentage increment
pub const DEFAULT_RANGE_STEP: i64 = 20;

/// Immutable configuration for one benchmarking invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Independent timing trials per sweep point
    pub n_repeat: usize,
    /// Workflow executions per trial
    pub n_number: usize,
    /// First percentage (inclusive)
    pub range_start: i64,
    /// Last percentage (exclusive)
    pub range_end: i64,
    /// Percentage increment
    pub range_step: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_repeat: DEFAULT_REPEAT,
            n_number: DEFAULT_NUMBER,
            range_start: DEFAULT_RANGE_START,
            range_end: DEFAULT_RANGE_END,
            range_step: DEFAULT_RANGE_STEP,
        }
    }
}

impl SweepConfig {
    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.n_repeat == 0 {
            return Err(SweepError::InvalidRepeat(self.n_repeat));
        }
        if self.n_number == 0 {
            return Err(SweepError::InvalidNumber(self.n_number));
        }
        Sweep::new(self.range_start, self.range_end, self.range_step).map(|_| ())
    }

    /// Validate and build the sweep this configuration describes
    pub fn sweep(&self) -> Result<Sweep, SweepError> {
        self.validate()?;
        Sweep::new(self.range_start, self.range_end, self.range_step)
    }
}

/// A validated percentage range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    start: i64,
    end: i64,
    step: i64,
}

impl Sweep {
    /// Build a sweep over `[start, end)` advancing by `step`.
    ///
    /// Rejects a non-positive step (the sweep would never advance) and an
    /// empty range (the run would silently produce no results).
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self, SweepError> {
        if step <= 0 {
            return Err(SweepError::InvalidStep(step));
        }
        if start >= end {
            return Err(SweepError::EmptyRange { start, end });
        }
        Ok(Self { start, end, step })
    }

    /// Fresh iterator over the sweep points; a sweep can be walked any number of times
    pub fn iter(&self) -> SweepIter {
        SweepIter {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }

    /// Number of points, `ceil((end - start) / step)`
    pub fn len(&self) -> usize {
        let span = (self.end as i128) - (self.start as i128);
        let step = self.step as i128;
        ((span + step - 1) / step) as usize
    }

    /// Always false for a validated sweep
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display labels in sweep order
    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|point| point.label).collect()
    }
}

impl IntoIterator for &Sweep {
    type Item = SweepPoint;
    type IntoIter = SweepIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One swept parameter value
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Integer percentage
    pub percent: i64,
    /// Parameter passed to the workflow
    pub fraction: f64,
    /// Display label, e.g. `"40%"`
    pub label: String,
}

impl SweepPoint {
    /// Build the point for an integer percentage
    pub fn new(percent: i64) -> Self {
        Self {
            percent,
            fraction: percent as f64 / 100.0,
            label: format!("{percent}%"),
        }
    }
}

/// Lazy iterator over sweep points
#[derive(Debug, Clone)]
pub struct SweepIter {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl Iterator for SweepIter {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let percent = self.next.filter(|p| *p < self.end)?;
        // Overflow past i64::MAX ends the sweep
        self.next = percent.checked_add(self.step);
        Some(SweepPoint::new(percent))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(p) if p < self.end => {
                let span = (self.end as i128) - (p as i128);
                let step = self.step as i128;
                ((span + step - 1) / step) as usize
            }
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter {}

impl FusedIterator for SweepIter {}
