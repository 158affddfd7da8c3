//! Progress reporting
//!
//! Wraps a stopwatch so every completed sweep point advances a progress bar.
//! The bar is drawn between trials, never while one is being timed.

use indicatif::{ProgressBar, ProgressStyle};
use sweepbench_core::Stopwatch;

/// Stopwatch decorator ticking a progress bar per sweep point
pub struct ProgressStopwatch<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: Stopwatch> ProgressStopwatch<S> {
    /// Wrap `inner`, expecting `total` sweep points
    pub fn new(inner: S, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { inner, bar }
    }

    /// Wrap `inner` without drawing anything
    pub fn hidden(inner: S) -> Self {
        Self {
            inner,
            bar: ProgressBar::hidden(),
        }
    }

    /// Sweep points completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a final message
    pub fn finish(&self) {
        self.bar.finish_with_message("Complete");
    }

    /// Clear the bar after a failed run
    pub fn abandon(&self) {
        self.bar.abandon_with_message("Aborted");
    }
}

impl<S: Stopwatch> Stopwatch for ProgressStopwatch<S> {
    fn repeat(
        &mut self,
        f: &mut dyn FnMut() -> anyhow::Result<()>,
        repeat: usize,
        number: usize,
    ) -> anyhow::Result<Vec<f64>> {
        let samples = self.inner.repeat(f, repeat, number)?;
        self.bar.inc(1);
        Ok(samples)
    }
}
