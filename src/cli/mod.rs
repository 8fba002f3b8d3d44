//! Command-line interface for forkbench
//!
//! Parses arguments with clap, layers CLI overrides on top of the file and
//! environment configuration, runs the requested benchmarks and renders
//! their reports.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

pub use output::{Output, OutputFormat};

use commands::CommandContext;

/// forkbench - sequential vs fork-join parallel benchmarks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Exact number of parallel workers (default: derived from CPU count)
    #[arg(short, long, global = true, env = "FORKBENCH_WORKERS")]
    pub workers: Option<usize>,

    /// Seed for generated sample data
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a batch of images sequentially and in parallel
    Download(commands::download::DownloadArgs),
    /// Multiply two random square matrices
    Matrix(commands::matrix::MatrixArgs),
    /// Merge sort a random array
    Sort(commands::sort::SortArgs),
    /// Run every benchmark with configured defaults
    All,
    /// Configuration management
    #[command(subcommand)]
    Config(commands::config::ConfigCommands),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let overrides = self.overrides();
        let ctx = CommandContext::new(
            self.config.as_deref(),
            overrides,
            self.workers,
            output,
        )?;

        let reports = match &self.command {
            Commands::Download(_) => vec![commands::download::execute(&ctx)?],
            Commands::Matrix(_) => vec![commands::matrix::execute(&ctx)?],
            Commands::Sort(_) => vec![commands::sort::execute(&ctx)?],
            Commands::All => vec![
                commands::download::execute(&ctx)?,
                commands::matrix::execute(&ctx)?,
                commands::sort::execute(&ctx)?,
            ],
            Commands::Config(cmd) => return commands::config::execute(cmd, &ctx, self.format),
        };

        ctx.output.reports(&reports, self.format)
    }

    /// CLI values that take precedence over every other configuration layer
    fn overrides(&self) -> serde_json::Value {
        let mut overrides = serde_json::json!({});
        if let Some(seed) = self.seed {
            overrides["bench"] = serde_json::json!({ "seed": seed });
        }
        let (section, args) = match &self.command {
            Commands::Download(args) => ("download", serde_json::to_value(args)),
            Commands::Matrix(args) => ("matrix", serde_json::to_value(args)),
            Commands::Sort(args) => ("sort", serde_json::to_value(args)),
            Commands::All | Commands::Config(_) => return overrides,
        };
        if let Ok(args) = args {
            overrides[section] = args;
        }
        overrides
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_only_include_given_values() {
        let cli = Cli::parse_from(["forkbench", "--seed", "9", "matrix", "--size", "32"]);
        let overrides = cli.overrides();
        assert_eq!(overrides["bench"]["seed"], 9);
        assert_eq!(overrides["matrix"]["size"], 32);
        assert!(overrides["matrix"].get("runs").is_none());
        assert!(overrides.get("download").is_none());
    }

    #[test]
    fn test_all_has_no_workload_overrides() {
        let cli = Cli::parse_from(["forkbench", "all"]);
        assert_eq!(cli.overrides(), serde_json::json!({}));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["forkbench", "sort", "--workers", "3", "--format", "json"]);
        assert_eq!(cli.workers, Some(3));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
