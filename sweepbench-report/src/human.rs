//! Human-readable Output
//!
//! Terminal summary of a tidy table: one block per operation/workflow, one
//! line per sweep label with the group statistics.

use crate::groups::GroupSummary;
use crate::meta::RunMeta;
use crate::tidy::TidyTable;
use std::fmt::Write;

/// Groups whose coefficient of variation reaches this percentage are flagged
pub const UNSTABLE_CV_PERCENT: f64 = 10.0;

/// Format seconds with a unit that keeps three significant digits readable
pub fn format_seconds(seconds: f64) -> String {
    let abs = seconds.abs();
    if abs >= 1.0 {
        format!("{:.3} s", seconds)
    } else if abs >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else if abs >= 1e-6 {
        format!("{:.3} µs", seconds * 1e6)
    } else {
        format!("{:.1} ns", seconds * 1e9)
    }
}

/// Format a table for terminal display
pub fn format_human_output(table: &TidyTable, meta: &RunMeta) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("SweepBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    let _ = writeln!(
        output,
        "repeat: {}  number: {}  sweep: {}%..{}% step {}%",
        meta.config.n_repeat,
        meta.config.n_number,
        meta.config.range_start,
        meta.config.range_end,
        meta.config.range_step
    );
    let _ = writeln!(
        output,
        "{} ({}/{}){}",
        meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        meta.os,
        meta.arch,
        meta.git_commit
            .as_deref()
            .map(|c| format!("  commit {c}"))
            .unwrap_or_default()
    );
    output.push('\n');

    let summaries = table.summaries();
    let label_width = summaries
        .iter()
        .map(|s| s.sample_percentage.len())
        .max()
        .unwrap_or(0)
        .max("Sample".len());

    let mut unstable = 0usize;
    let mut current: Option<(Option<&str>, &str)> = None;
    for summary in &summaries {
        let key = (summary.operation.as_deref(), summary.workflow.as_str());
        if current != Some(key) {
            current = Some(key);
            push_block_header(&mut output, summary, label_width);
        }

        let stats = &summary.stats;
        let stable = stats.is_stable(UNSTABLE_CV_PERCENT);
        if !stable {
            unstable += 1;
        }
        let _ = writeln!(
            output,
            "  {:>width$}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}  {:>6.1}%{}",
            summary.sample_percentage,
            format_seconds(stats.mean),
            format_seconds(stats.median),
            format_seconds(stats.iqr()),
            format_seconds(stats.min),
            format_seconds(stats.max),
            stats.coefficient_of_variation(),
            if stable { "" } else { " *" },
            width = label_width
        );
    }

    output.push('\n');
    let _ = writeln!(
        output,
        "{} rows, {} groups",
        table.len(),
        summaries.len()
    );
    if unstable > 0 {
        let _ = writeln!(
            output,
            "* {} groups with cv >= {:.0}%, consider a larger --repeat",
            unstable, UNSTABLE_CV_PERCENT
        );
    }
    output
}

fn push_block_header(output: &mut String, summary: &GroupSummary, label_width: usize) {
    output.push('\n');
    match &summary.operation {
        Some(operation) => {
            let _ = writeln!(output, "{} / {}", operation, summary.workflow);
        }
        None => {
            let _ = writeln!(output, "{}", summary.workflow);
        }
    }
    output.push_str(&"-".repeat(60));
    output.push('\n');
    let _ = writeln!(
        output,
        "  {:>width$}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}  {:>7}",
        "Sample",
        "mean",
        "median",
        "iqr",
        "min",
        "max",
        "cv",
        width = label_width
    );
}
