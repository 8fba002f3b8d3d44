use anyhow::Result;
use clap::Parser;
use forkbench::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
