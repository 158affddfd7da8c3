//! Tidy Transformer
//!
//! Flattens tiered raw results into long form, one row per timing sample:
//!
//! ```text
//! {"read": {"w": {"20%": [t1, t2]}}}
//!        │
//!        ▼
//! Operation  Workflow  Sample Percentage  Time
//! read       w         20%                t1
//! read       w         20%                t2
//! ```
//!
//! Rows follow the nesting order (operation, workflow, label, trial). The
//! row index is implicit and carries no meaning.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sweepbench_core::{OperationResults, RawResults, WorkflowResults};

/// Column header of the operation label
pub const OPERATION_COLUMN: &str = "Operation";
/// Column header of the workflow identifier
pub const WORKFLOW_COLUMN: &str = "Workflow";
/// Column header of the sweep label
pub const SAMPLE_PERCENTAGE_COLUMN: &str = "Sample Percentage";
/// Column header of the elapsed time
pub const TIME_COLUMN: &str = "Time";

/// One timing sample in long form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    /// Operation label, present only for operation-level results
    #[serde(rename = "Operation", skip_serializing_if = "Option::is_none", default)]
    pub operation: Option<String>,
    /// Workflow identifier
    #[serde(rename = "Workflow")]
    pub workflow: String,
    /// Sweep label, e.g. `"40%"`
    #[serde(rename = "Sample Percentage")]
    pub sample_percentage: String,
    /// Elapsed seconds of one trial
    #[serde(rename = "Time")]
    pub time: f64,
}

/// Key identifying one sample group
pub type GroupKey = (Option<String>, String, String);

/// Long-form benchmark table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TidyTable {
    records: Vec<TidyRecord>,
    operations_included: bool,
}

impl TidyTable {
    /// Empty table with the given column set
    pub fn new(operations_included: bool) -> Self {
        Self {
            records: Vec::new(),
            operations_included,
        }
    }

    /// Whether the `Operation` column is present
    pub fn operations_included(&self) -> bool {
        self.operations_included
    }

    /// Column headers in order
    pub fn columns(&self) -> &'static [&'static str] {
        if self.operations_included {
            &[
                OPERATION_COLUMN,
                WORKFLOW_COLUMN,
                SAMPLE_PERCENTAGE_COLUMN,
                TIME_COLUMN,
            ]
        } else {
            &[WORKFLOW_COLUMN, SAMPLE_PERCENTAGE_COLUMN, TIME_COLUMN]
        }
    }

    /// Rows in order
    pub fn records(&self) -> &[TidyRecord] {
        &self.records
    }

    /// Row at a 0-based index
    pub fn get(&self, row: usize) -> Option<&TidyRecord> {
        self.records.get(row)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, TidyRecord> {
        self.records.iter()
    }

    /// String cells of one row in column order, the time formatted losslessly
    pub fn row_cells(&self, record: &TidyRecord) -> Vec<String> {
        let mut cells = Vec::with_capacity(4);
        if self.operations_included {
            cells.push(record.operation.clone().unwrap_or_default());
        }
        cells.push(record.workflow.clone());
        cells.push(record.sample_percentage.clone());
        cells.push(record.time.to_string());
        cells
    }

    /// Group samples back by `(operation?, workflow, label)`, first-seen order
    pub fn regroup(&self) -> IndexMap<GroupKey, Vec<f64>> {
        let mut groups: IndexMap<GroupKey, Vec<f64>> = IndexMap::new();
        for record in &self.records {
            groups
                .entry((
                    record.operation.clone(),
                    record.workflow.clone(),
                    record.sample_percentage.clone(),
                ))
                .or_default()
                .push(record.time);
        }
        groups
    }

    fn push(&mut self, operation: Option<&str>, workflow: &str, label: &str, time: f64) {
        self.records.push(TidyRecord {
            operation: operation.map(str::to_string),
            workflow: workflow.to_string(),
            sample_percentage: label.to_string(),
            time,
        });
    }
}

impl<'a> IntoIterator for &'a TidyTable {
    type Item = &'a TidyRecord;
    type IntoIter = std::slice::Iter<'a, TidyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Reshape raw results of either level into a tidy table
pub fn summarize_benchmark(raw: &RawResults) -> TidyTable {
    match raw {
        RawResults::Workflows(results) => tidy_workflows(results),
        RawResults::Operations(results) => tidy_operations(results),
    }
}

/// Reshape workflow → label → samples into `Workflow, Sample Percentage, Time`
pub fn tidy_workflows(results: &WorkflowResults) -> TidyTable {
    let mut table = TidyTable::new(false);
    table.records.reserve(results.sample_count());
    explode_workflows(&mut table, None, results);
    table
}

/// Reshape operation → workflow → label → samples into
/// `Operation, Workflow, Sample Percentage, Time`
pub fn tidy_operations(results: &OperationResults) -> TidyTable {
    let mut table = TidyTable::new(true);
    table.records.reserve(results.sample_count());
    for (operation, workflows) in results.iter() {
        explode_workflows(&mut table, Some(operation), workflows);
    }
    table
}

fn explode_workflows(table: &mut TidyTable, operation: Option<&str>, results: &WorkflowResults) {
    for (workflow, sweep) in results.iter() {
        for (label, samples) in sweep {
            for &time in samples {
                table.push(operation, workflow, label, time);
            }
        }
    }
}
