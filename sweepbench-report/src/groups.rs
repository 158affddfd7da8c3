//! Group Summaries
//!
//! Per `(operation?, workflow, sample percentage)` statistics over a tidy
//! table, the usual first step of any downstream analysis.

use crate::tidy::TidyTable;
use serde::{Deserialize, Serialize};
use sweepbench_stats::{SummaryStatistics, compute_summary};

/// Statistics of one sample group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Operation label, if the table has one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub operation: Option<String>,
    /// Workflow identifier
    pub workflow: String,
    /// Sweep label
    pub sample_percentage: String,
    /// Statistics over the group's samples
    pub stats: SummaryStatistics,
}

impl TidyTable {
    /// Summaries per group, in the order groups first appear
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.regroup()
            .into_iter()
            .map(
                |((operation, workflow, sample_percentage), samples)| GroupSummary {
                    operation,
                    workflow,
                    sample_percentage,
                    stats: compute_summary(&samples),
                },
            )
            .collect()
    }
}
