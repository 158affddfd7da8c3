//! Sweep Aggregation
//!
//! Drives the sweep and the trial runner over every workflow, optionally once
//! per operation. Everything runs sequentially in a fixed order:
//!
//! ```text
//! operation (caller order)
//!   └── workflow (caller order)
//!         └── sweep point (ascending percentage)
//!               └── repeat × number executions
//! ```
//!
//! Validation and name resolution happen before the first trial. After that,
//! the first failure aborts the whole batch; no partial results are returned.

use crate::environment::{Environment, ResolvedWorkflow, WorkflowMap};
use crate::error::HarnessError;
use crate::measure::Stopwatch;
use crate::results::{OperationResults, SweepSamples, WorkflowResults};
use crate::sweep::{Sweep, SweepConfig};
use crate::trial::run_trials;
use std::collections::HashSet;
use tracing::info;

/// Benchmark every workflow across the sweep.
///
/// Returns workflow → sweep label → samples, workflows in caller order and
/// labels in ascending percentage order.
pub fn benchmark_workflows(
    workflows: &WorkflowMap,
    env: &Environment,
    config: &SweepConfig,
    stopwatch: &mut dyn Stopwatch,
) -> Result<WorkflowResults, HarnessError> {
    let sweep = config.sweep()?;
    let resolved = env.resolve_all(workflows)?;
    run_sweep(&resolved, &sweep, config, stopwatch)
}

/// Benchmark the full workflow sweep once per operation.
///
/// Each operation reuses the same workflows and configuration and is run
/// independently of the others.
pub fn benchmark_operations<S: AsRef<str>>(
    operations: &[S],
    workflows: &WorkflowMap,
    env: &Environment,
    config: &SweepConfig,
    stopwatch: &mut dyn Stopwatch,
) -> Result<OperationResults, HarnessError> {
    let sweep = config.sweep()?;

    let mut seen = HashSet::with_capacity(operations.len());
    for operation in operations {
        if !seen.insert(operation.as_ref()) {
            return Err(HarnessError::DuplicateOperation(
                operation.as_ref().to_string(),
            ));
        }
    }

    let resolved = env.resolve_all(workflows)?;

    let mut results = OperationResults::new();
    for operation in operations {
        let operation = operation.as_ref();
        info!(operation, "benchmarking operation");
        let workflow_results = run_sweep(&resolved, &sweep, config, stopwatch)?;
        results.insert(operation, workflow_results);
    }

    Ok(results)
}

fn run_sweep(
    resolved: &[ResolvedWorkflow<'_>],
    sweep: &Sweep,
    config: &SweepConfig,
    stopwatch: &mut dyn Stopwatch,
) -> Result<WorkflowResults, HarnessError> {
    let mut results = WorkflowResults::new();

    for workflow in resolved {
        info!(
            workflow = workflow.id(),
            call = %workflow.invocation(),
            points = sweep.len(),
            "benchmarking workflow"
        );

        let mut samples = SweepSamples::with_capacity(sweep.len());
        for point in sweep {
            let trial = run_trials(
                workflow,
                point.fraction,
                stopwatch,
                config.n_repeat,
                config.n_number,
            )?;
            samples.insert(point.label, trial);
        }

        results.insert(workflow.id(), samples);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{CallArgs, Invocation};
    use crate::error::SweepError;
    use std::sync::{Arc, Mutex};

    /// Hands out 1.0, 2.0, 3.0, ... one per trial
    #[derive(Default)]
    struct CountingStopwatch {
        next: f64,
        calls: usize,
    }

    impl Stopwatch for CountingStopwatch {
        fn repeat(
            &mut self,
            f: &mut dyn FnMut() -> anyhow::Result<()>,
            repeat: usize,
            number: usize,
        ) -> anyhow::Result<Vec<f64>> {
            self.calls += 1;
            let mut out = Vec::with_capacity(repeat);
            for _ in 0..repeat {
                for _ in 0..number {
                    f()?;
                }
                self.next += 1.0;
                out.push(self.next);
            }
            Ok(out)
        }
    }

    fn scenario_config() -> SweepConfig {
        SweepConfig {
            n_repeat: 2,
            n_number: 1,
            range_start: 20,
            range_end: 61,
            range_step: 20,
        }
    }

    fn single_workflow_env() -> (Environment, WorkflowMap) {
        let mut env = Environment::new();
        env.register("bench.w", |_: &CallArgs<'_>| Ok(()));
        let mut workflows = WorkflowMap::new();
        workflows.insert("w".to_string(), Invocation::new("bench.w"));
        (env, workflows)
    }

    #[test]
    fn test_single_workflow_scenario() {
        let (env, workflows) = single_workflow_env();
        let mut stopwatch = CountingStopwatch::default();

        let results =
            benchmark_workflows(&workflows, &env, &scenario_config(), &mut stopwatch).unwrap();

        let w = results.get("w").unwrap();
        let labels: Vec<_> = w.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["20%", "40%", "60%"]);
        assert_eq!(w["20%"], vec![1.0, 2.0]);
        assert_eq!(w["40%"], vec![3.0, 4.0]);
        assert_eq!(w["60%"], vec![5.0, 6.0]);
        assert_eq!(results.sample_count(), 6);
    }

    #[test]
    fn test_workflow_order_and_fractions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut env = Environment::new();
        for name in ["fast", "slow"] {
            let log = Arc::clone(&log);
            env.register(name, move |args: &CallArgs<'_>| {
                log.lock().unwrap().push((name, args.fraction));
                Ok(())
            });
        }

        let mut workflows = WorkflowMap::new();
        workflows.insert("slow".to_string(), Invocation::new("slow"));
        workflows.insert("fast".to_string(), Invocation::new("fast"));

        let config = SweepConfig {
            n_repeat: 1,
            n_number: 1,
            range_start: 50,
            range_end: 101,
            range_step: 50,
        };
        let results =
            benchmark_workflows(&workflows, &env, &config, &mut CountingStopwatch::default())
                .unwrap();

        let order: Vec<_> = results.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["slow", "fast"]);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("slow", 0.5), ("slow", 1.0), ("fast", 0.5), ("fast", 1.0)]
        );
    }

    #[test]
    fn test_operations_scenario() {
        let (env, workflows) = single_workflow_env();
        let config = SweepConfig {
            n_repeat: 1,
            n_number: 2,
            range_start: 20,
            range_end: 41,
            range_step: 20,
        };
        let mut stopwatch = CountingStopwatch::default();

        let results =
            benchmark_operations(&["read", "write"], &workflows, &env, &config, &mut stopwatch)
                .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.sample_count(), 4);
        assert_eq!(stopwatch.calls, 4);
        assert_eq!(results.get("write").unwrap().get("w").unwrap()["40%"], vec![4.0]);
    }

    #[test]
    fn test_resolution_error_before_timing() {
        let mut env = Environment::new();
        env.register("known", |_: &CallArgs<'_>| Ok(()));
        let mut workflows = WorkflowMap::new();
        workflows.insert("ok".to_string(), Invocation::new("known"));
        workflows.insert("bad".to_string(), Invocation::new("undefined_name"));

        let mut stopwatch = CountingStopwatch::default();
        let err = benchmark_workflows(&workflows, &env, &SweepConfig::default(), &mut stopwatch)
            .unwrap_err();

        assert!(matches!(err, HarnessError::Resolution { .. }));
        assert_eq!(stopwatch.calls, 0);
    }

    #[test]
    fn test_config_error_before_timing() {
        let (env, workflows) = single_workflow_env();
        let config = SweepConfig {
            range_step: 0,
            ..Default::default()
        };
        let mut stopwatch = CountingStopwatch::default();

        let err = benchmark_operations(&["read"], &workflows, &env, &config, &mut stopwatch)
            .unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Config(SweepError::InvalidStep(0))
        ));
        assert_eq!(stopwatch.calls, 0);
    }

    #[test]
    fn test_failure_aborts_batch() {
        let mut env = Environment::new();
        env.register("ok", |_: &CallArgs<'_>| Ok(()));
        env.register("flaky", |args: &CallArgs<'_>| {
            anyhow::ensure!(args.fraction < 0.5, "too much data");
            Ok(())
        });
        let mut workflows = WorkflowMap::new();
        workflows.insert("flaky".to_string(), Invocation::new("flaky"));
        workflows.insert("ok".to_string(), Invocation::new("ok"));

        let mut stopwatch = CountingStopwatch::default();
        let err = benchmark_workflows(&workflows, &env, &SweepConfig::default(), &mut stopwatch)
            .unwrap_err();

        assert!(matches!(err, HarnessError::Workflow { .. }));
        // 20% and 40% succeed, 60% fails, "ok" never runs
        assert_eq!(stopwatch.calls, 3);
    }

    #[test]
    fn test_duplicate_operations_rejected() {
        let (env, workflows) = single_workflow_env();
        let err = benchmark_operations(
            &["read", "read"],
            &workflows,
            &env,
            &SweepConfig::default(),
            &mut CountingStopwatch::default(),
        )
        .unwrap_err();

        assert!(matches!(err, HarnessError::DuplicateOperation(op) if op == "read"));
    }

    #[test]
    fn test_every_sequence_has_repeat_samples() {
        let (env, workflows) = single_workflow_env();
        for n_repeat in 1..6 {
            let config = SweepConfig {
                n_repeat,
                n_number: 1,
                ..Default::default()
            };
            let results = benchmark_workflows(
                &workflows,
                &env,
                &config,
                &mut CountingStopwatch::default(),
            )
            .unwrap();

            for (_, sweep) in results.iter() {
                assert!(sweep.values().all(|s| s.len() == n_repeat));
            }
        }
    }
}
