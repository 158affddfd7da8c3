//! Error Taxonomy
//!
//! Configuration problems are `SweepError`s and are raised before any trial
//! runs. Everything that can go wrong while benchmarking is a `HarnessError`;
//! there is no recovery layer, every error reaches the caller.

use thiserror::Error;

/// Invalid sweep configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    /// Step must advance the sweep
    #[error("Invalid range step: {0} (must be greater than 0)")]
    InvalidStep(i64),

    /// Range would yield no sweep points
    #[error("Empty sweep range: start {start}% is not below end {end}%")]
    EmptyRange {
        /// Inclusive range start
        start: i64,
        /// Exclusive range end
        end: i64,
    },

    /// At least one trial is required per sweep point
    #[error("Invalid repeat count: {0} (must be at least 1)")]
    InvalidRepeat(usize),

    /// At least one iteration is required per trial
    #[error("Invalid number per trial: {0} (must be at least 1)")]
    InvalidNumber(usize),

    /// The total number of trial batches does not fit in `usize`
    #[error("Sweep too large: {points} points x {workflows} workflows x {operations} operations")]
    TooManyTrials {
        /// Sweep points
        points: usize,
        /// Workflows
        workflows: usize,
        /// Operations, at least 1
        operations: usize,
    },
}

/// Errors raised while running a benchmark batch
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Sweep configuration rejected
    #[error("Invalid sweep configuration: {0}")]
    Config(#[from] SweepError),

    /// Invocation target is not bound in the environment
    #[error("Cannot resolve workflow '{workflow}': unknown callable '{target}'")]
    Resolution {
        /// Workflow identifier
        workflow: String,
        /// Callable name the invocation referenced
        target: String,
    },

    /// The benchmarked workflow itself failed
    #[error("Workflow '{workflow}' failed at fraction {fraction}")]
    Workflow {
        /// Workflow identifier
        workflow: String,
        /// Swept parameter value of the failing trial
        fraction: f64,
        /// Error returned by the workflow
        #[source]
        source: anyhow::Error,
    },

    /// A stopwatch broke the one-sample-per-trial contract
    #[error("Stopwatch returned {got} samples for workflow '{workflow}', expected {expected}")]
    SampleCount {
        /// Workflow identifier
        workflow: String,
        /// Requested repeat count
        expected: usize,
        /// Samples actually returned
        got: usize,
    },

    /// The same operation label was given twice
    #[error("Duplicate operation label: {0}")]
    DuplicateOperation(String),
}

impl HarnessError {
    /// Whether this error was raised before any timing took place
    pub fn is_pre_timing(&self) -> bool {
        matches!(
            self,
            HarnessError::Config(_)
                | HarnessError::Resolution { .. }
                | HarnessError::DuplicateOperation(_)
        )
    }
}
