//! Styled console output for forkbench
//!
//! Human-readable messages go through [`Output`]; benchmark reports can also
//! be emitted as JSON for scripting.

use crate::bench::BenchmarkReport;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Report rendering selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a step in a process (stderr, so JSON on stdout stays clean)
    pub fn step(&self, step: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("❯").cyan(), step);
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<26} {}", style(key).dim(), styled_value);
        }
    }

    /// Progress bar over the timed runs of one workload; hidden in quiet mode
    pub fn progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("#>-"));
        }
        pb.set_message(message.to_string());
        pb
    }

    /// Print benchmark reports in the requested format
    pub fn reports(&self, reports: &[BenchmarkReport], format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let json = match reports {
                    [single] => serde_json::to_string_pretty(single)?,
                    _ => serde_json::to_string_pretty(reports)?,
                };
                println!("{}", json);
            }
            OutputFormat::Text => {
                for report in reports {
                    self.report(report);
                }
            }
        }
        Ok(())
    }

    fn report(&self, report: &BenchmarkReport) {
        self.header(&format!(
            "{} ({} runs, {} workers)",
            report.workload, report.runs, report.workers
        ));
        if let Some(detail) = &report.detail {
            self.success(detail);
        }
        self.key_value(
            "Average Sequential Time:",
            &format!("{:.1} ms", report.sequential_ms),
            false,
        );
        self.key_value(
            "Average Parallel Time:",
            &format!("{:.1} ms", report.parallel_ms),
            false,
        );
        self.key_value("Speedup:", &format!("{:.2}", report.speedup), true);
        self.key_value(
            "Efficiency:",
            &format!("{:.2}%", report.efficiency_percent),
            false,
        );
    }
}
