use super::CommandContext;
use crate::bench::{BenchmarkReport, Harness};
use crate::forkjoin::ExecutionStrategy;
use crate::workloads::download::{HttpFetcher, download_all, sample_ids};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::time::Duration;

#[derive(Args, Debug, Default, Serialize)]
pub struct DownloadArgs {
    /// Number of images to download (ids 1..=COUNT)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Timed runs per strategy
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<usize>,
}

pub fn execute(ctx: &CommandContext) -> Result<BenchmarkReport> {
    let settings = &ctx.settings.download;
    let fetcher = HttpFetcher::new(
        settings.url_template.as_str(),
        Duration::from_secs(settings.timeout_secs),
        settings.retries,
    );
    let ids = sample_ids(settings.count);
    let parallel = ctx.parallel_strategy()?;

    ctx.output
        .step(&format!("Downloading {} images from {}", ids.len(), settings.url_template));

    let progress = ctx.progress("download", settings.runs);
    let harness = Harness::new(settings.runs, parallel.workers()).with_progress(|phase, run, total| {
        progress.set_message(format!("download: {phase} {run}/{total}"));
        progress.inc(1);
    });
    let comparison = harness
        .compare(
            "download",
            || (),
            |_| download_all(&ExecutionStrategy::Sequential, &ids, settings.image_count, &fetcher),
            |_| download_all(&parallel, &ids, settings.image_count, &fetcher),
        )
        .context("Download benchmark failed")?;
    progress.finish_and_clear();

    let total = comparison.result;
    if total.failures > 0 {
        ctx.output.warning(&format!(
            "{} of {} downloads failed and were counted as 0 bytes",
            total.failures,
            ids.len()
        ));
    }

    Ok(comparison.report.with_detail(format!(
        "Downloaded {} images totaling {:.1} MB",
        ids.len(),
        total.bytes as f64 / 1e6
    )))
}
