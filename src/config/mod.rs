//! Configuration management for forkbench
//!
//! Settings are layered with figment (see [`ForkbenchConfig::load_with`]) and
//! extracted into the typed [`Settings`] tree below.

use crate::error::{Error, Result};
use crate::forkjoin::ExecutionStrategy;
use serde::{Deserialize, Serialize};

pub mod core;

pub use self::core::ForkbenchConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub parallel: ParallelSettings,
    #[serde(default)]
    pub bench: BenchSettings,
    pub download: DownloadSettings,
    pub matrix: MatrixSettings,
    pub sort: SortSettings,
}

/// Worker pool sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelSettings {
    /// Maximum worker threads (0 = no cap)
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
}

impl ParallelSettings {
    pub fn workers(&self) -> usize {
        ExecutionStrategy::calculate_optimal_workers(self.max_threads, self.thread_percentage)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchSettings {
    /// Fixed seed for sample data
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Image URL with a `{n}` placeholder for the 3-digit image number
    pub url_template: String,
    pub image_count: u32,
    pub count: usize,
    pub timeout_secs: u64,
    pub retries: u32,
    pub runs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSettings {
    pub size: usize,
    pub max_value: i64,
    pub runs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSettings {
    pub length: usize,
    pub runs: usize,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.parallel.thread_percentage) {
            return Err(Error::config(
                "parallel.thread_percentage",
                "must be between 1 and 100",
            ));
        }
        if self.download.image_count == 0 {
            return Err(Error::config("download.image_count", "must be at least 1"));
        }
        if !self.download.url_template.contains("{n}") {
            return Err(Error::config(
                "download.url_template",
                "must contain the {n} placeholder",
            ));
        }
        if self.matrix.max_value < 1 {
            return Err(Error::config("matrix.max_value", "must be at least 1"));
        }

        for (key, runs) in [
            ("download.runs", self.download.runs),
            ("matrix.runs", self.matrix.runs),
            ("sort.runs", self.sort.runs),
        ] {
            if runs == 0 {
                return Err(Error::config(key, "must be at least 1"));
            }
        }
        Ok(())
    }
}
