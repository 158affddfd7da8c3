#![warn(missing_docs)]
//! # SweepBench
//!
//! Parameter-sweep benchmarking for data-loading workflows.
//!
//! SweepBench times a set of named workflows while a sampling percentage is
//! swept over a range, then reshapes the timings into a tidy table:
//! - **Sweeps**: half-open percentage ranges (`20..101 step 20` by default)
//! - **Trials**: `repeat` independent timings of `number` executions each
//! - **Operations**: optional labels that run the whole sweep once per label
//! - **Tidy output**: one row per sample, written as CSV or JSON only when
//!   overwriting is requested
//!
//! ## Quick Start
//!
//! ```ignore
//! use sweepbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new()
//!         .register("reader.eager", |args: &CallArgs<'_>| {
//!             load_rows(args.input_path, args.fraction)
//!         })
//!         .workflow("eager", "reader.eager");
//!     sweepbench::run(suite)
//! }
//! ```
//!
//! ## Library Use
//!
//! ```ignore
//! let raw = suite.run(&SweepConfig::default(), &mut WallClock)?;
//! let table = summarize_benchmark(&raw);
//! save_benchmark(&table, "results.csv", &CsvWriter, true)?;
//! ```

// Re-export core types
pub use sweepbench_core::{
    CallArgs, Environment, FixedArgs, HarnessError, Invocation, OperationResults, RawResults,
    ResolvedWorkflow, Stopwatch, Suite, Sweep, SweepConfig, SweepError, SweepPoint, SweepSamples,
    Timer, WallClock, WorkflowMap, WorkflowResults, benchmark_operations, benchmark_workflows,
    run_trials,
};

// Re-export stats
pub use sweepbench_stats::{SummaryStatistics, compute_summary};

// Re-export reporting
pub use sweepbench_report::{
    CsvWriter, GroupSummary, JsonWriter, OutputFormat, SaveOutcome, SinkError, TidyRecord,
    TidyTable, WriteFn, WriteMode, save_benchmark, summarize_benchmark,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CallArgs, CsvWriter, Invocation, JsonWriter, Stopwatch, Suite, SweepConfig, WallClock,
        save_benchmark, summarize_benchmark,
    };
}

/// Run the SweepBench CLI harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     sweepbench::run(suite)
/// }
/// ```
pub use sweepbench_cli::run;
