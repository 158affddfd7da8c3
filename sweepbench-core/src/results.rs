//! Raw Results
//!
//! Tiered ordered maps produced by the aggregators:
//!
//! ```text
//! WorkflowResults:   workflow  → label → [t1, t2, …]
//! OperationResults:  operation → workflow → label → [t1, t2, …]
//! ```
//!
//! Both serialize to the plain nested JSON object shape. [`RawResults`] is
//! the sum of the two so consumers dispatch on the variant instead of
//! inspecting the nesting depth.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sample sequences of one workflow, keyed by sweep label in sweep order
pub type SweepSamples = IndexMap<String, Vec<f64>>;

/// Two-level results: workflow → sweep label → samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowResults {
    workflows: IndexMap<String, SweepSamples>,
}

impl WorkflowResults {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the sweep samples of a workflow
    pub fn insert(&mut self, workflow: impl Into<String>, samples: SweepSamples) {
        self.workflows.insert(workflow.into(), samples);
    }

    /// Samples of one workflow
    pub fn get(&self, workflow: &str) -> Option<&SweepSamples> {
        self.workflows.get(workflow)
    }

    /// Workflows in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SweepSamples)> {
        self.workflows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of workflows
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Whether no workflow was recorded
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Total number of individual samples
    pub fn sample_count(&self) -> usize {
        self.workflows
            .values()
            .flat_map(|sweep| sweep.values())
            .map(Vec::len)
            .sum()
    }
}

/// Three-level results: operation → workflow → sweep label → samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationResults {
    operations: IndexMap<String, WorkflowResults>,
}

impl OperationResults {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the workflow results of an operation
    pub fn insert(&mut self, operation: impl Into<String>, results: WorkflowResults) {
        self.operations.insert(operation.into(), results);
    }

    /// Results of one operation
    pub fn get(&self, operation: &str) -> Option<&WorkflowResults> {
        self.operations.get(operation)
    }

    /// Operations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkflowResults)> {
        self.operations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation was recorded
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Total number of individual samples
    pub fn sample_count(&self) -> usize {
        self.operations
            .values()
            .map(WorkflowResults::sample_count)
            .sum()
    }
}

/// Raw results at either aggregation level.
///
/// Serializes to the bare nested shape. It is not
/// `Deserialize`: `{"read": {}}` is valid at both levels, so readers parse
/// [`WorkflowResults`] or [`OperationResults`] directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawResults {
    /// Produced by `benchmark_workflows`
    Workflows(WorkflowResults),
    /// Produced by `benchmark_operations`
    Operations(OperationResults),
}

impl RawResults {
    /// Whether an operation level is present
    pub fn operations_included(&self) -> bool {
        matches!(self, RawResults::Operations(_))
    }

    /// Total number of individual samples
    pub fn sample_count(&self) -> usize {
        match self {
            RawResults::Workflows(results) => results.sample_count(),
            RawResults::Operations(results) => results.sample_count(),
        }
    }
}

impl From<WorkflowResults> for RawResults {
    fn from(results: WorkflowResults) -> Self {
        RawResults::Workflows(results)
    }
}

impl From<OperationResults> for RawResults {
    fn from(results: OperationResults) -> Self {
        RawResults::Operations(results)
    }
}
