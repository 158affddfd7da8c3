//! Timing Primitives
//!
//! The harness never reads a clock on its own: every trial goes through a
//! [`Stopwatch`], which follows the "repeat independent trials, each trial
//! runs N iterations" contract. [`WallClock`] is the default implementation;
//! callers can plug in any other timing source.

use std::time::{Duration, Instant};

/// Timer for one trial
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer started
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Repeat-execution timing facility.
///
/// `repeat` must call `f` exactly `number` times per trial, for `repeat`
/// trials, and return one elapsed time in seconds per trial. The first error
/// returned by `f` aborts the measurement and is handed back unchanged.
pub trait Stopwatch {
    /// Time `repeat` trials of `number` back-to-back calls to `f`
    fn repeat(
        &mut self,
        f: &mut dyn FnMut() -> anyhow::Result<()>,
        repeat: usize,
        number: usize,
    ) -> anyhow::Result<Vec<f64>>;
}

impl<S: Stopwatch + ?Sized> Stopwatch for &mut S {
    fn repeat(
        &mut self,
        f: &mut dyn FnMut() -> anyhow::Result<()>,
        repeat: usize,
        number: usize,
    ) -> anyhow::Result<Vec<f64>> {
        (**self).repeat(f, repeat, number)
    }
}

impl<S: Stopwatch + ?Sized> Stopwatch for Box<S> {
    fn repeat(
        &mut self,
        f: &mut dyn FnMut() -> anyhow::Result<()>,
        repeat: usize,
        number: usize,
    ) -> anyhow::Result<Vec<f64>> {
        (**self).repeat(f, repeat, number)
    }
}

/// Monotonic wall-clock stopwatch
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Stopwatch for WallClock {
    fn repeat(
        &mut self,
        f: &mut dyn FnMut() -> anyhow::Result<()>,
        repeat: usize,
        number: usize,
    ) -> anyhow::Result<Vec<f64>> {
        let mut trials = Vec::with_capacity(repeat);
        for _ in 0..repeat {
            let timer = Timer::start();
            for _ in 0..number {
                std::hint::black_box(f())?;
            }
            trials.push(timer.stop().as_secs_f64());
        }
        Ok(trials)
    }
}
