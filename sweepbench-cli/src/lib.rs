#![warn(missing_docs)]
//! SweepBench CLI Library
//!
//! This module provides the CLI infrastructure for sweep benchmark binaries.
//! Build a [`Suite`] in your main function and hand it to `sweepbench::run()`
//! (or `sweepbench_cli::run()`) to get the full command line.
//!
//! # Example
//!
//! ```ignore
//! use sweepbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new()
//!         .register("reader.eager", |args: &CallArgs<'_>| load(args.input_path, args.fraction))
//!         .workflow("eager", "reader.eager");
//!     sweepbench::run(suite)
//! }
//! ```

mod config;
mod progress;

pub use config::*;
pub use progress::ProgressStopwatch;

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use sweepbench_core::{Suite, SweepConfig, WallClock};
use sweepbench_report::{
    OutputFormat, RunMeta, RunReport, SaveOutcome, TidyTable, format_human_output,
    generate_raw_report, save_benchmark, summarize_benchmark,
};

/// SweepBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sweepbench")]
#[command(author, version, about = "SweepBench - parameter-sweep benchmarking")]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter workflows by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Independent timing trials per sweep point
    #[arg(long)]
    pub repeat: Option<usize>,

    /// Workflow executions inside one trial
    #[arg(long)]
    pub number: Option<usize>,

    /// First sampling percentage
    #[arg(long)]
    pub start: Option<i64>,

    /// Sampling percentage bound (exclusive)
    #[arg(long)]
    pub end: Option<i64>,

    /// Sampling percentage step
    #[arg(long)]
    pub step: Option<i64>,

    /// Benchmark the sweep once per operation label (repeatable)
    #[arg(long = "operation")]
    pub operations: Vec<String>,

    /// Output format: human, csv, json, raw
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output file; without it nothing is written to disk
    #[arg(long)]
    pub overwrite: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the workflows and operations that would run
    List,
    /// Run the sweep (default)
    Run,
    /// Print a default sweep.toml
    Init,
}

/// Run the SweepBench CLI for `suite` with the process arguments.
/// This is the main entry point for sweep benchmark binaries.
pub fn run(suite: Suite) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, suite)
}

/// Run the SweepBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, suite: Suite) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "sweepbench=debug"
    } else {
        "sweepbench=info"
    };
    // A subscriber may already be installed by the host binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Discover sweep.toml configuration (CLI flags override)
    let config = SweepbenchConfig::discover()?.unwrap_or_default();
    execute(&cli, &config, suite)
}

/// Dispatch a parsed command line against an already loaded configuration
pub fn execute(cli: &Cli, config: &SweepbenchConfig, suite: Suite) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            print!("{}", SweepbenchConfig::default_toml());
            Ok(())
        }
        Some(Commands::List) => {
            let suite = prepare_suite(cli, config, suite)?;
            print!("{}", list_workflows(&suite));
            Ok(())
        }
        Some(Commands::Run) | None => run_sweep(cli, config, suite),
    }
}

/// Layer CLI overrides on top of the `[sweep]` section
pub fn build_sweep_config(cli: &Cli, config: &SweepbenchConfig) -> SweepConfig {
    let base = &config.sweep;
    SweepConfig {
        n_repeat: cli.repeat.unwrap_or(base.n_repeat),
        n_number: cli.number.unwrap_or(base.n_number),
        range_start: cli.start.unwrap_or(base.range_start),
        range_end: cli.end.unwrap_or(base.range_end),
        range_step: cli.step.unwrap_or(base.range_step),
    }
}

/// Apply fixed arguments, the workflow filter and operation labels to `suite`
fn prepare_suite(cli: &Cli, config: &SweepbenchConfig, mut suite: Suite) -> anyhow::Result<Suite> {
    let filter_re = Regex::new(&cli.filter)
        .with_context(|| format!("invalid workflow filter '{}'", cli.filter))?;

    suite.bind_args(&config.invocation);
    suite.retain_workflows(|id| filter_re.is_match(id));

    if !cli.operations.is_empty() {
        suite.set_operations(cli.operations.clone());
    } else if !config.operations.is_empty() {
        suite.set_operations(config.operations.clone());
    }

    Ok(suite)
}

/// Render the run plan of `suite`
pub fn list_workflows(suite: &Suite) -> String {
    let mut out = String::from("SweepBench Plan:\n");

    if !suite.operations().is_empty() {
        out.push_str(&format!("├── operations: {}\n", suite.operations().join(", ")));
    }
    for (id, invocation) in suite.workflows() {
        let marker = if suite.environment().contains(&invocation.target) {
            ""
        } else {
            "  (unbound)"
        };
        out.push_str(&format!("│   ├── {} = {}{}\n", id, invocation, marker));
    }
    out.push_str(&format!("{} workflows found.\n", suite.workflows().len()));
    out
}

fn run_sweep(cli: &Cli, config: &SweepbenchConfig, suite: Suite) -> anyhow::Result<()> {
    let suite = prepare_suite(cli, config, suite)?;
    let sweep_config = build_sweep_config(cli, config);
    sweep_config.validate()?;

    let format_str = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_str.parse().map_err(anyhow::Error::msg)?;
    let output_path = cli.output.clone().or_else(|| config.output.path.clone());
    let overwrite = cli.overwrite || config.output.overwrite;

    if suite.workflows().is_empty() {
        println!("No workflows found.");
        return Ok(());
    }

    let total = suite.trial_batches(&sweep_config)?;
    tracing::info!(
        workflows = suite.workflows().len(),
        operations = suite.operations().len(),
        batches = total,
        "starting sweep"
    );

    let meta = RunMeta::capture(sweep_config);
    let mut stopwatch = ProgressStopwatch::new(WallClock, total as u64);
    let raw = match suite.run(&sweep_config, &mut stopwatch) {
        Ok(raw) => {
            stopwatch.finish();
            raw
        }
        Err(e) => {
            stopwatch.abandon();
            return Err(e.into());
        }
    };

    let table = summarize_benchmark(&raw);
    let report = RunReport::new(meta, raw);
    emit(&table, &report, format, output_path, overwrite)
}

/// Print or persist a finished run in the selected format
fn emit(
    table: &TidyTable,
    report: &RunReport,
    format: OutputFormat,
    output_path: Option<PathBuf>,
    overwrite: bool,
) -> anyhow::Result<()> {
    let Some(path) = output_path else {
        let text = match format {
            OutputFormat::Human => format_human_output(table, &report.meta),
            OutputFormat::Csv => sweepbench_report::generate_csv_report(table)?,
            OutputFormat::Json => sweepbench_report::generate_json_report(table)?,
            OutputFormat::Raw => generate_raw_report(report)?,
        };
        println!("{}", text);
        return Ok(());
    };

    let outcome = match format.writer() {
        Some(writer) => save_benchmark(table, &path, writer, overwrite)?,
        None if overwrite => {
            let text = match format {
                OutputFormat::Raw => generate_raw_report(report)?,
                _ => format_human_output(table, &report.meta),
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            SaveOutcome::Written
        }
        None => SaveOutcome::Skipped,
    };

    match outcome {
        SaveOutcome::Written => eprintln!("Results written to: {}", path.display()),
        SaveOutcome::Skipped => eprintln!(
            "Results not written to {} (pass --overwrite to replace it)",
            path.display()
        ),
    }
    Ok(())
}
