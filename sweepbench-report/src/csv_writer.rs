//! CSV Output

use crate::sink::{Manifest, SinkError, WriteFn, WriteMode, ensure_parent};
use crate::tidy::TidyTable;
use std::io::Write;
use std::path::Path;

/// Write the table as CSV with a header row
pub fn write_csv<W: Write>(table: &TidyTable, writer: W) -> Result<(), SinkError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(table.columns())?;
    for record in table {
        wtr.write_record(table.row_cells(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the table as a CSV string
pub fn generate_csv_report(table: &TidyTable) -> Result<String, SinkError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| SinkError::Write(e.into()))
}

/// Write function producing CSV files
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl WriteFn for CsvWriter {
    fn write(
        &self,
        table: &TidyTable,
        path: &Path,
        mode: WriteMode,
        register: bool,
    ) -> Result<(), SinkError> {
        let manifest = register.then(|| Manifest::load_for(path)).transpose()?;
        ensure_parent(path)?;
        let file = match mode {
            WriteMode::Overwrite => std::fs::File::create(path)?,
        };
        write_csv(table, file)?;
        if let Some(manifest) = manifest {
            manifest.record(table, path, "csv")?;
        }
        Ok(())
    }
}
