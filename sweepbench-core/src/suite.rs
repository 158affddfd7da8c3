//! Benchmark Suite
//!
//! Bundles an environment with the workflows and operations to run, so a
//! benchmark binary can hand everything to the CLI in one value.

use crate::aggregate::{benchmark_operations, benchmark_workflows};
use crate::environment::{CallArgs, Environment, FixedArgs, Invocation, WorkflowMap};
use crate::error::{HarnessError, SweepError};
use crate::measure::Stopwatch;
use crate::results::RawResults;
use crate::sweep::SweepConfig;

/// Environment, workflows and operations of one benchmark suite
#[derive(Debug, Default)]
pub struct Suite {
    environment: Environment,
    workflows: WorkflowMap,
    operations: Vec<String>,
}

impl Suite {
    /// Create an empty suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a callable in the suite's environment
    pub fn register<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CallArgs<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.environment.register(name, f);
        self
    }

    /// Add a workflow invoking `target` with the default fixed arguments
    pub fn workflow(self, id: impl Into<String>, target: impl Into<String>) -> Self {
        self.invocation(id, Invocation::new(target))
    }

    /// Add a workflow with an explicit invocation
    pub fn invocation(mut self, id: impl Into<String>, invocation: Invocation) -> Self {
        self.workflows.insert(id.into(), invocation);
        self
    }

    /// Add an operation label
    pub fn operation(mut self, label: impl Into<String>) -> Self {
        self.operations.push(label.into());
        self
    }

    /// Rebind the fixed arguments of every workflow
    pub fn bind_args(&mut self, args: &FixedArgs) {
        for invocation in self.workflows.values_mut() {
            invocation.args = args.clone();
        }
    }

    /// Keep only the workflows whose identifier satisfies `keep`
    pub fn retain_workflows(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.workflows.retain(|id, _| keep(id));
    }

    /// Replace the operation labels
    pub fn set_operations(&mut self, operations: Vec<String>) {
        self.operations = operations;
    }

    /// The suite's environment
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Workflows in registration order
    pub fn workflows(&self) -> &WorkflowMap {
        &self.workflows
    }

    /// Operation labels; empty means a plain workflow sweep
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Number of `Stopwatch::repeat` calls a run of this suite makes
    pub fn trial_batches(&self, config: &SweepConfig) -> Result<usize, HarnessError> {
        let points = config.sweep()?.len();
        let operations = self.operations.len().max(1);
        let workflows = self.workflows.len();
        operations
            .checked_mul(workflows)
            .and_then(|n| n.checked_mul(points))
            .ok_or_else(|| {
                SweepError::TooManyTrials {
                    points,
                    workflows,
                    operations,
                }
                .into()
            })
    }

    /// Run the suite: per operation when any are set, otherwise a plain sweep
    pub fn run(
        &self,
        config: &SweepConfig,
        stopwatch: &mut dyn Stopwatch,
    ) -> Result<RawResults, HarnessError> {
        if self.operations.is_empty() {
            benchmark_workflows(&self.workflows, &self.environment, config, stopwatch)
                .map(RawResults::from)
        } else {
            benchmark_operations(
                &self.operations,
                &self.workflows,
                &self.environment,
                config,
                stopwatch,
            )
            .map(RawResults::from)
        }
    }
}
