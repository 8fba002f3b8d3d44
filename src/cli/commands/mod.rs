use crate::cli::Output;
use crate::config::{ForkbenchConfig, Settings};
use crate::forkjoin::ExecutionStrategy;
use anyhow::Result;
use indicatif::ProgressBar;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod config;
pub mod download;
pub mod matrix;
pub mod sort;

/// Everything a command needs: merged configuration, worker budget and output
pub struct CommandContext {
    pub config: ForkbenchConfig,
    pub settings: Settings,
    pub workers: usize,
    pub output: Output,
}

impl CommandContext {
    pub fn new(
        custom_config: Option<&str>,
        overrides: serde_json::Value,
        workers: Option<usize>,
        output: Output,
    ) -> Result<Self> {
        let config = ForkbenchConfig::load_with(custom_config, Some(overrides))?;
        let settings = config.settings()?;
        let workers = workers
            .unwrap_or_else(|| settings.parallel.workers())
            .max(1);
        output.verbose(&format!("Using {} parallel workers", workers));

        Ok(Self {
            config,
            settings,
            workers,
            output,
        })
    }

    pub fn parallel_strategy(&self) -> Result<ExecutionStrategy> {
        Ok(ExecutionStrategy::parallel(self.workers)?)
    }

    /// Sample data generator, reproducible when a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.settings.bench.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Progress over both strategies' timed runs
    pub fn progress(&self, workload: &str, runs: usize) -> ProgressBar {
        self.output
            .progress_bar((runs * 2) as u64, &format!("{workload}: sequential"))
    }
}
