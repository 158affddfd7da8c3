//! JSON Output

use crate::meta::RunReport;
use crate::sink::{Manifest, SinkError, WriteFn, WriteMode, ensure_parent};
use crate::tidy::TidyTable;
use std::path::Path;

/// Render the table as a pretty JSON array of records
pub fn generate_json_report(table: &TidyTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table.records())
}

/// Render raw nested results with their metadata
pub fn generate_raw_report(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write function producing JSON files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl WriteFn for JsonWriter {
    fn write(
        &self,
        table: &TidyTable,
        path: &Path,
        mode: WriteMode,
        register: bool,
    ) -> Result<(), SinkError> {
        let manifest = register.then(|| Manifest::load_for(path)).transpose()?;
        ensure_parent(path)?;
        let json = generate_json_report(table)?;
        match mode {
            WriteMode::Overwrite => std::fs::write(path, json)?,
        }
        if let Some(manifest) = manifest {
            manifest.record(table, path, "json")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::RunMeta;
    use crate::tidy::{TidyRecord, tidy_operations};
    use sweepbench_core::{OperationResults, RawResults, SweepConfig, SweepSamples, WorkflowResults};

    fn operations() -> OperationResults {
        let mut sweep = SweepSamples::new();
        sweep.insert("20%".to_string(), vec![0.5]);
        let mut workflows = WorkflowResults::new();
        workflows.insert("w", sweep);
        let mut ops = OperationResults::new();
        ops.insert("read", workflows);
        ops
    }

    #[test]
    fn test_records_round_trip_through_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        let table = tidy_operations(&operations());

        JsonWriter
            .write(&table, &path, WriteMode::Overwrite, false)
            .unwrap();

        let records: Vec<TidyRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records, table.records());
        assert_eq!(records[0].operation.as_deref(), Some("read"));
    }

    #[test]
    fn test_raw_report_keeps_nesting() {
        let report = RunReport::new(
            RunMeta::capture(SweepConfig::default()),
            RawResults::from(operations()),
        );
        let json = generate_raw_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["results"]["read"]["w"]["20%"][0], 0.5);
        assert_eq!(value["meta"]["config"]["n_repeat"], 5);
        assert_eq!(value["operations_included"], true);
    }

    #[test]
    fn test_raw_report_states_level_of_empty_operation() {
        let mut ops = OperationResults::new();
        ops.insert("read", WorkflowResults::new());
        let report = RunReport::new(
            RunMeta::capture(SweepConfig::default()),
            RawResults::from(ops.clone()),
        );
        assert!(report.operations_included());

        let value: serde_json::Value =
            serde_json::from_str(&generate_raw_report(&report).unwrap()).unwrap();
        assert_eq!(value["operations_included"], true);
        assert_eq!(value["results"], serde_json::json!({"read": {}}));

        let back: OperationResults = serde_json::from_value(value["results"].clone()).unwrap();
        assert_eq!(back, ops);
    }
}
