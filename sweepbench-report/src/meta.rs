//! Run Metadata
//!
//! Context recorded alongside raw results: when and where the sweep ran and
//! with which configuration. Git details degrade to `None` outside a
//! repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sweepbench_core::{RawResults, SweepConfig};

/// Metadata of one benchmarking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    /// Harness version
    pub version: String,
    /// Start of the run
    pub timestamp: DateTime<Utc>,
    /// Current commit, if inside a git checkout
    pub git_commit: Option<String>,
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Sweep configuration used
    pub config: SweepConfig,
}

impl RunMeta {
    /// Capture metadata for a run starting now
    pub fn capture(config: SweepConfig) -> Self {
        let git_commit = std::process::Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            git_commit,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            config,
        }
    }
}

/// Raw results together with their run metadata.
///
/// The nested `results` object looks the same at both aggregation levels when
/// a level is empty, so the level is written out explicitly next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Run metadata
    pub meta: RunMeta,
    operations_included: bool,
    /// Nested raw results
    pub results: RawResults,
}

impl RunReport {
    /// Pair raw results with the metadata of the run that produced them
    pub fn new(meta: RunMeta, results: RawResults) -> Self {
        Self {
            meta,
            operations_included: results.operations_included(),
            results,
        }
    }

    /// Whether `results` is operation → workflow → label → samples
    pub fn operations_included(&self) -> bool {
        self.operations_included
    }
}
