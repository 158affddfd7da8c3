//! Demo suite: two in-memory "readers" timed across the sampling sweep.
//!
//! ```text
//! cargo run --example sweep_demo -- --repeat 3 --operation parse --operation sum
//! cargo run --example sweep_demo -- list
//! ```

use sweepbench::prelude::*;

const ROWS: usize = 200_000;

/// Materialise `fraction` of the rows eagerly, then fold them
fn eager_read(args: &CallArgs<'_>) -> anyhow::Result<()> {
    let rows = (ROWS as f64 * args.fraction) as usize;
    let data: Vec<u64> = (0..rows as u64).map(|i| i.wrapping_mul(31)).collect();
    std::hint::black_box(data.iter().sum::<u64>());
    Ok(())
}

/// Stream the same rows without collecting them
fn lazy_scan(args: &CallArgs<'_>) -> anyhow::Result<()> {
    let rows = (ROWS as f64 * args.fraction) as usize;
    let total: u64 = (0..rows as u64).map(|i| i.wrapping_mul(31)).sum();
    std::hint::black_box(total);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let suite = Suite::new()
        .register("demo.eager_read", eager_read)
        .register("demo.lazy_scan", lazy_scan)
        .workflow("eager", "demo.eager_read")
        .workflow("lazy", "demo.lazy_scan");

    sweepbench::run(suite)
}
