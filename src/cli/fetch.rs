//! Fetch command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::fetch::{
    FetchOptions, Incident, LastRun, MemoryRunStateStore, RunStateStore, SeverityFloor, poll,
};
use crate::models::IncidentDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;

/// Flags that override the `fetch` section of the config file.
#[derive(Debug, Clone, Default)]
pub struct FetchOverrides {
    pub severity: Option<SeverityFloor>,
    pub include_archived: bool,
    pub archive: bool,
    pub dry_run: bool,
}

impl FetchOverrides {
    /// Apply the flags on top of the configured options.
    pub fn apply(&self, mut options: FetchOptions) -> FetchOptions {
        if let Some(severity) = self.severity {
            options.severity = severity;
        }
        options.include_archived |= self.include_archived;
        options.archive_fetched |= self.archive;
        if self.dry_run {
            options.archive_fetched = false;
        }
        options
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchReport<'a> {
    incidents: &'a [Incident],
    last_run: String,
    dry_run: bool,
}

/// Run the `fetch` command
pub async fn run(opts: &GlobalOptions, overrides: &FetchOverrides) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let options = overrides.apply(ctx.config.fetch.clone());
    let store = ctx.state_store();

    let outcome = if overrides.dry_run {
        // Start from the real cursor but keep the new one in memory
        let preview = MemoryRunStateStore::seeded(store.get_last_run()?);
        poll(&ctx.client, &preview, &options).await?
    } else {
        poll(&ctx.client, &store, &options).await?
    };
    let last_run = LastRun::from(outcome.next_cursor).last_run;

    match ctx.format {
        OutputFormat::Json => {
            let report = FetchReport {
                incidents: &outcome.incidents,
                last_run,
                dry_run: overrides.dry_run,
            };
            println!("{}", format_json(&report)?);
        }
        OutputFormat::Table => {
            let rows: Vec<IncidentDisplay> =
                outcome.incidents.iter().map(IncidentDisplay::from).collect();
            rows.print(ctx.format)?;

            let verb = if overrides.dry_run { "Would set" } else { "Set" };
            println!(
                "\n{} {} incident(s). {} last run to {}",
                "✓".green(),
                outcome.incidents.len(),
                verb,
                last_run.cyan()
            );
        }
    }
    Ok(())
}
