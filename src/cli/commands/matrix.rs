use super::CommandContext;
use crate::bench::{BenchmarkReport, Harness};
use crate::forkjoin::ExecutionStrategy;
use crate::workloads::matrix::{Matrix, multiply};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug, Default, Serialize)]
pub struct MatrixArgs {
    /// Side length of the square input matrices
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,

    /// Timed runs per strategy
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<usize>,
}

pub fn execute(ctx: &CommandContext) -> Result<BenchmarkReport> {
    let settings = &ctx.settings.matrix;
    let size = settings.size;
    let mut rng = ctx.rng();

    ctx.output
        .step(&format!("Generating random {size} x {size} matrices..."));
    let a = Matrix::random(size, size, settings.max_value, &mut rng);
    let b = Matrix::random(size, size, settings.max_value, &mut rng);
    let parallel = ctx.parallel_strategy()?;

    let progress = ctx.progress("matrix", settings.runs);
    let harness = Harness::new(settings.runs, parallel.workers()).with_progress(|phase, run, total| {
        progress.set_message(format!("matrix: {phase} {run}/{total}"));
        progress.inc(1);
    });
    let comparison = harness
        .compare(
            "matrix",
            || (),
            |_| multiply(&ExecutionStrategy::Sequential, &a, &b),
            |_| multiply(&parallel, &a, &b),
        )
        .context("Matrix benchmark failed")?;
    progress.finish_and_clear();

    let product = comparison.result;
    Ok(comparison.report.with_detail(format!(
        "Multiplied {size} x {size} matrices into a {} x {} product",
        product.rows(),
        product.cols()
    )))
}
