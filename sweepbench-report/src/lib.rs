#![warn(missing_docs)]
//! SweepBench Report - Reshaping and Output
//!
//! Turns raw sweep results into something analysis code can use:
//! - Tidy (long-form) table, one row per timing sample
//! - Per-group summary statistics
//! - CSV / JSON / human-readable output
//! - Result sink gated by an explicit overwrite flag

mod csv_writer;
mod groups;
mod human;
mod json;
mod meta;
mod sink;
mod tidy;

pub use csv_writer::{CsvWriter, generate_csv_report, write_csv};
pub use groups::GroupSummary;
pub use human::{UNSTABLE_CV_PERCENT, format_human_output, format_seconds};
pub use json::{JsonWriter, generate_json_report, generate_raw_report};
pub use meta::{RunMeta, RunReport};
pub use sink::{
    MANIFEST_FILE, Manifest, ManifestEntry, SaveOutcome, SinkError, WriteFn, WriteMode,
    save_benchmark,
};
pub use tidy::{
    GroupKey, OPERATION_COLUMN, SAMPLE_PERCENTAGE_COLUMN, TIME_COLUMN, TidyRecord, TidyTable,
    WORKFLOW_COLUMN, summarize_benchmark, tidy_operations, tidy_workflows,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Terminal summary
    Human,
    /// Tidy table as CSV
    Csv,
    /// Tidy table as a JSON array of records
    Json,
    /// Nested raw results with run metadata
    Raw,
}

impl OutputFormat {
    /// Write function persisting a tidy table in this format, if any
    pub fn writer(self) -> Option<&'static dyn WriteFn> {
        match self {
            OutputFormat::Csv => Some(&CsvWriter),
            OutputFormat::Json => Some(&JsonWriter),
            OutputFormat::Human | OutputFormat::Raw => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "raw" | "raw-json" => Ok(OutputFormat::Raw),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
