use super::CommandContext;
use crate::bench::{BenchmarkReport, Harness};
use crate::forkjoin::ExecutionStrategy;
use crate::workloads::sort::{merge_sort, random_array};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug, Default, Serialize)]
pub struct SortArgs {
    /// Number of random integers to sort
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Timed runs per strategy
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<usize>,
}

pub fn execute(ctx: &CommandContext) -> Result<BenchmarkReport> {
    let settings = &ctx.settings.sort;
    let mut rng = ctx.rng();

    ctx.output
        .step(&format!("Generating random array of {} integers...", settings.length));
    let input = random_array(settings.length, &mut rng);
    let parallel = ctx.parallel_strategy()?;

    let progress = ctx.progress("sort", settings.runs);
    let harness = Harness::new(settings.runs, parallel.workers()).with_progress(|phase, run, total| {
        progress.set_message(format!("sort: {phase} {run}/{total}"));
        progress.inc(1);
    });
    // every run sorts its own copy of the unsorted input
    let comparison = harness
        .compare(
            "sort",
            || input.clone(),
            |mut data| {
                merge_sort(&ExecutionStrategy::Sequential, &mut data)?;
                Ok(data)
            },
            |mut data| {
                merge_sort(&parallel, &mut data)?;
                Ok(data)
            },
        )
        .context("Sort benchmark failed")?;
    progress.finish_and_clear();

    Ok(comparison
        .report
        .with_detail(format!("Sorted {} integers", comparison.result.len())))
}
