//! Findings command implementation

use log::debug;

use crate::cli::args::{FindingFilterArgs, GlobalOptions, PaginationArgs};
use crate::cli::CommandContext;
use crate::commands::get_findings_command;
use crate::error::Result;
use crate::output::print_command;

/// Run the `findings list` command
pub async fn list(
    opts: &GlobalOptions,
    filters: &FindingFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let query = filters.to_query(pagination);

    let (readable, output, findings) = get_findings_command(&ctx.client, &query).await?;
    debug!("Retrieved {} finding(s)", findings.len());

    print_command(&readable, &output, ctx.format)
}
