#![warn(missing_docs)]
//! SweepBench Core - Sweep Runtime
//!
//! This crate provides the execution side of the harness:
//! - `Sweep` / `SweepConfig` for the swept sampling percentages
//! - `Stopwatch` timing seam with a wall-clock default
//! - `Environment` name bindings that workflows are resolved against
//! - Trial runner and the workflow / operation aggregators
//! - `RawResults` tiered result maps

mod aggregate;
mod environment;
mod error;
mod measure;
mod results;
mod suite;
mod sweep;
mod trial;

pub use aggregate::{benchmark_operations, benchmark_workflows};
pub use environment::{
    CallArgs, DEFAULT_INPUT_PATH, DEFAULT_READIN_FUNC, Environment, FixedArgs, Invocation,
    ResolvedWorkflow, WorkflowFn, WorkflowMap,
};
pub use error::{HarnessError, SweepError};
pub use measure::{Stopwatch, Timer, WallClock};
pub use results::{OperationResults, RawResults, SweepSamples, WorkflowResults};
pub use suite::Suite;
pub use sweep::{
    DEFAULT_NUMBER, DEFAULT_RANGE_END, DEFAULT_RANGE_START, DEFAULT_RANGE_STEP, DEFAULT_REPEAT,
    Sweep, SweepConfig, SweepIter, SweepPoint,
};
pub use trial::run_trials;
