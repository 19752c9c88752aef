//! Members command implementation

use colored::Colorize;

use crate::cli::args::{GlobalOptions, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::ListMembersRequest;
use crate::commands::{get_members_command, list_members_command};
use crate::error::Result;
use crate::output::print_command;

/// Run the `members list` command
pub async fn list(
    opts: &GlobalOptions,
    only_associated: Option<bool>,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let request = ListMembersRequest {
        only_associated,
        max_results: pagination.max_results,
        next_token: pagination.next_token.clone(),
    };

    let (readable, output, response) = list_members_command(&ctx.client, &request).await?;
    print_command(&readable, &output, ctx.format)?;

    if let (Some(token), OutputFormat::Table) = (response.next_token, ctx.format) {
        eprintln!("{} more results: --next-token {}", "→".dimmed(), token);
    }
    Ok(())
}

/// Run the `members get` command
pub async fn get(opts: &GlobalOptions, account_ids: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let (readable, output, _) = get_members_command(&ctx.client, account_ids).await?;
    print_command(&readable, &output, ctx.format)
}
