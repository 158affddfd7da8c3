//! Result Sink
//!
//! Persists a tidy table through a caller-supplied write function. Nothing is
//! written unless the caller explicitly asks for a destructive overwrite, so
//! earlier benchmark runs are never clobbered by accident.

use crate::tidy::TidyTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the registration manifest kept next to written outputs
pub const MANIFEST_FILE: &str = ".sweepbench-manifest.json";

/// Errors from persisting a table
#[derive(Debug, Error)]
pub enum SinkError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom write function failed
    #[error("Write function failed: {0}")]
    Write(#[source] anyhow::Error),
}

/// How the destination is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace whatever is at the destination
    Overwrite,
}

impl WriteMode {
    /// Mode indicator as passed to external writers
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Overwrite => "overwrite",
        }
    }
}

/// Externally supplied write function
pub trait WriteFn {
    /// Persist `table` at `path`; `register` asks the writer to also record
    /// the output wherever its catalog lives
    fn write(
        &self,
        table: &TidyTable,
        path: &Path,
        mode: WriteMode,
        register: bool,
    ) -> Result<(), SinkError>;
}

impl<W: WriteFn + ?Sized> WriteFn for &W {
    fn write(
        &self,
        table: &TidyTable,
        path: &Path,
        mode: WriteMode,
        register: bool,
    ) -> Result<(), SinkError> {
        (**self).write(table, path, mode, register)
    }
}

/// Whether `save_benchmark` wrote anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The write function was invoked and succeeded
    Written,
    /// `overwrite` was false; nothing was touched
    Skipped,
}

/// Write `table` to `output_path` through `write_fn`, only when `overwrite` is set.
///
/// With `overwrite = false` this is a deliberate no-op: the write function is
/// never called and no error is returned.
pub fn save_benchmark(
    table: &TidyTable,
    output_path: impl AsRef<Path>,
    write_fn: &dyn WriteFn,
    overwrite: bool,
) -> Result<SaveOutcome, SinkError> {
    let output_path = output_path.as_ref();

    if !overwrite {
        warn!(
            path = %output_path.display(),
            "overwrite not requested, benchmark results not written"
        );
        return Ok(SaveOutcome::Skipped);
    }

    write_fn.write(table, output_path, WriteMode::Overwrite, true)?;
    debug!(path = %output_path.display(), rows = table.len(), "benchmark results written");
    Ok(SaveOutcome::Written)
}

/// One registered output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Canonical path of the written file
    pub path: PathBuf,
    /// Output format
    pub format: String,
    /// Row count
    pub rows: usize,
    /// Column headers
    pub columns: Vec<String>,
    /// Time of the write
    pub written_at: DateTime<Utc>,
}

/// Registry of written outputs, stored in [`MANIFEST_FILE`] beside them.
///
/// Writers load it before touching the destination, so an unreadable
/// manifest fails the save while the previous output is still intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load the manifest of the directory `output` is written to
    pub fn load_for(output: &Path) -> Result<Self, SinkError> {
        let path = output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(MANIFEST_FILE);

        let entries = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };

        Ok(Self { path, entries })
    }

    /// Registered outputs, oldest first
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Record `output`, which must already exist, and save the manifest.
    ///
    /// Entries are keyed by canonical path; an earlier entry for the same file
    /// is replaced, mirroring the overwrite.
    pub fn record(
        mut self,
        table: &TidyTable,
        output: &Path,
        format: &str,
    ) -> Result<PathBuf, SinkError> {
        let canonical = std::fs::canonicalize(output)?;

        self.entries.retain(|entry| entry.path != canonical);
        self.entries.push(ManifestEntry {
            path: canonical,
            format: format.to_string(),
            rows: table.len(),
            columns: table.columns().iter().map(|c| c.to_string()).collect(),
            written_at: Utc::now(),
        });

        std::fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(self.path)
    }
}

/// Create the parent directory of `path` if needed
pub(crate) fn ensure_parent(path: &Path) -> Result<(), SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
