//! Tag-resource command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::commands::tag_resource_command;
use crate::error::Result;
use crate::output::json::format_json;

/// Run the `tag-resource` command
pub async fn run(opts: &GlobalOptions, resource_arn: &str, tags: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let applied = tag_resource_command(&ctx.client, resource_arn, tags).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&applied)?),
        OutputFormat::Table => {
            println!("{} Tagged {}", "✓".green(), resource_arn.bold());
            for (key, value) in &applied {
                println!("  {} = {}", key, value);
            }
        }
    }
    Ok(())
}
