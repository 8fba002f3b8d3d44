use super::CommandContext;
use crate::cli::OutputFormat;
use anyhow::Result;
use clap::Subcommand;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show,
    /// Validate the merged configuration
    Validate,
}

pub fn execute(cmd: &ConfigCommands, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&ctx.config.get_full_config()?)?,
                OutputFormat::Text => toml::to_string_pretty(&ctx.settings)?,
            };
            println!("{}", rendered);
        }
        // settings were validated while building the context
        ConfigCommands::Validate => ctx.output.success("Configuration is valid"),
    }
    Ok(())
}
