//! Trial Runner
//!
//! Times one resolved workflow at one swept parameter value: `repeat`
//! independent trials, each executing the workflow `number` times.

use crate::environment::ResolvedWorkflow;
use crate::error::HarnessError;
use crate::measure::Stopwatch;
use tracing::debug;

/// Run the trials of one workflow at one sweep point.
///
/// Returns exactly `repeat` elapsed times. A workflow failure is returned as
/// [`HarnessError::Workflow`] without retry.
pub fn run_trials(
    workflow: &ResolvedWorkflow<'_>,
    fraction: f64,
    stopwatch: &mut dyn Stopwatch,
    repeat: usize,
    number: usize,
) -> Result<Vec<f64>, HarnessError> {
    debug!(
        workflow = workflow.id(),
        fraction, repeat, number, "running trials"
    );

    let samples = stopwatch
        .repeat(&mut || workflow.call(fraction), repeat, number)
        .map_err(|source| HarnessError::Workflow {
            workflow: workflow.id().to_string(),
            fraction,
            source,
        })?;

    if samples.len() != repeat {
        return Err(HarnessError::SampleCount {
            workflow: workflow.id().to_string(),
            expected: repeat,
            got: samples.len(),
        });
    }

    Ok(samples)
}
