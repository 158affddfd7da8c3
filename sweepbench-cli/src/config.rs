//! Configuration loading from sweep.toml
//!
//! SweepBench configuration can be specified in a `sweep.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory; command-line flags override its values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sweepbench_core::{FixedArgs, SweepConfig};

/// Name of the configuration file
pub const CONFIG_FILE: &str = "sweep.toml";

/// SweepBench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SweepbenchConfig {
    /// Sweep and repetition settings
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Fixed arguments bound to every workflow
    #[serde(default)]
    pub invocation: FixedArgs,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Operation labels; empty runs a plain workflow sweep
    #[serde(default)]
    pub operations: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "csv", "json", "raw"
    #[serde(default = "default_format")]
    pub format: String,
    /// Destination file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Replace an existing destination; nothing is written otherwise
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
            overwrite: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl SweepbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the nearest `sweep.toml` walking up from `start`
    pub fn find_from(start: impl AsRef<Path>) -> Option<PathBuf> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load configuration from the current directory upwards.
    ///
    /// A missing file yields `Ok(None)`; a file that fails to parse is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        match Self::find_from(cwd) {
            Some(path) => Self::load(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SweepBench Configuration

[sweep]
# Independent timing trials per sweep point
n_repeat = 5
# Workflow executions inside one trial
n_number = 3
# Sampling percentages: range_start..range_end (exclusive) by range_step
range_start = 20
range_end = 101
range_step = 20

[invocation]
# Fixed arguments handed to every workflow
readin_func = "cp.read"
input_path = "path/to/file.parquet"

[output]
# Output format: human, csv, json, raw
format = "human"
# Destination file (uncomment to enable; stdout otherwise)
# path = "target/sweepbench/results.csv"
# Replace an existing destination; nothing is written unless true
overwrite = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SweepbenchConfig::default();
        assert_eq!(config.sweep, SweepConfig::default());
        assert_eq!(config.invocation.readin_func, "cp.read");
        assert_eq!(config.output.format, "human");
        assert!(!config.output.overwrite);
        assert!(config.operations.is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            operations = ["read", "write"]

            [sweep]
            n_repeat = 2
            range_step = 10

            [output]
            format = "csv"
            overwrite = true
        "#;

        let config: SweepbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sweep.n_repeat, 2);
        assert_eq!(config.sweep.range_step, 10);
        // Defaults should still apply
        assert_eq!(config.sweep.n_number, 3);
        assert_eq!(config.sweep.range_end, 101);
        assert_eq!(config.invocation.input_path, PathBuf::from("path/to/file.parquet"));
        assert_eq!(config.operations, vec!["read", "write"]);
        assert!(config.output.overwrite);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: SweepbenchConfig = toml::from_str(&SweepbenchConfig::default_toml()).unwrap();
        assert_eq!(config, SweepbenchConfig::default());
    }

    #[test]
    fn test_find_from_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[sweep]\nn_repeat = 1\n").unwrap();

        let found = SweepbenchConfig::find_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
        assert_eq!(SweepbenchConfig::load(found).unwrap().sweep.n_repeat, 1);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[sweep]\nn_repeat = \"five\"\n").unwrap();
        assert!(SweepbenchConfig::load(&path).is_err());
    }
}
