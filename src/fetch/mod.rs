//! Incremental incident fetch
//!
//! Each poll pulls the findings created since the last persisted cursor,
//! turns them into incident records and moves the cursor one millisecond
//! past the newest finding seen. A failed poll leaves the cursor untouched,
//! so findings are delivered at least once.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::client::SecurityHubApi;
use crate::client::models::{
    DateFilter, Finding, FindingFilters, GetFindingsRequest, NumberFilter, SortCriterion,
    SortOrder, StringFilter, UpdateFindingsRequest, push_filter,
};
use crate::commands::findings::fetch_all_findings;
use crate::error::Result;
use crate::output::formatters::format_iso8601;

pub mod cursor;
pub mod severity;
pub mod state;

pub use cursor::{Cursor, first_fetch_start};
pub use severity::{SeverityFloor, incident_severity};
pub use state::{FileRunStateStore, LastRun, MemoryRunStateStore, RunStateStore};

/// Largest page size accepted by GetFindings
pub const MAX_PAGE_SIZE: u32 = 100;

/// Settings for incident polling (the `fetch` section of the config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Minimum finding severity to ingest
    pub severity: SeverityFloor,

    /// Include findings whose record state is ARCHIVED
    pub include_archived: bool,

    /// Archive findings after they have been turned into incidents
    pub archive_fetched: bool,

    /// Start of the very first poll: relative span or ISO timestamp
    pub first_fetch: String,

    /// Page size for GetFindings
    pub max_results: u32,

    /// Finding type prefixes to match (e.g. `TTPs/Initial Access`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub finding_types: Vec<String>,

    /// Workflow statuses to match (e.g. `NEW`, `NOTIFIED`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workflow_status: Vec<String>,

    /// Only findings from this product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            severity: SeverityFloor::Low,
            include_archived: false,
            archive_fetched: false,
            first_fetch: "15 days".to_string(),
            max_results: MAX_PAGE_SIZE,
            finding_types: Vec::new(),
            workflow_status: Vec::new(),
            product_name: None,
        }
    }
}

impl FetchOptions {
    /// Build the GetFindings request for findings created in `[since, until]`.
    pub fn findings_request(&self, since: Cursor, until: DateTime<Utc>) -> GetFindingsRequest {
        let mut filters = FindingFilters::new();

        push_filter(
            &mut filters,
            "CreatedAt",
            DateFilter {
                start: Some(since.to_string()),
                end: Some(format_iso8601(&until)),
            },
        );
        push_filter(
            &mut filters,
            "SeverityNormalized",
            NumberFilter {
                gte: Some(f64::from(self.severity.normalized_floor())),
                ..Default::default()
            },
        );
        if !self.include_archived {
            push_filter(&mut filters, "RecordState", StringFilter::equals("ACTIVE"));
        }
        for finding_type in &self.finding_types {
            push_filter(&mut filters, "Type", StringFilter::prefix(finding_type));
        }
        for status in &self.workflow_status {
            push_filter(&mut filters, "WorkflowStatus", StringFilter::equals(status));
        }
        if let Some(ref product) = self.product_name {
            push_filter(&mut filters, "ProductName", StringFilter::equals(product));
        }

        GetFindingsRequest {
            filters,
            sort_criteria: vec![SortCriterion {
                field: "CreatedAt".to_string(),
                sort_order: SortOrder::Asc,
            }],
            max_results: Some(self.max_results.clamp(1, MAX_PAGE_SIZE)),
            next_token: None,
        }
    }
}

/// An incident record built from one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub name: String,

    /// The finding's `CreatedAt`, verbatim
    pub occurred: String,

    /// 1 (low) to 4 (critical)
    pub severity: u8,

    /// The full finding as JSON
    #[serde(rename = "rawJSON")]
    pub raw_json: String,
}

impl Incident {
    pub fn from_finding(finding: &Finding) -> Result<Self> {
        let name = finding
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| finding.id.clone());

        Ok(Self {
            name,
            occurred: finding.created_at.clone(),
            severity: incident_severity(finding),
            raw_json: serde_json::to_string(finding)?,
        })
    }
}

/// Result of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub incidents: Vec<Incident>,

    /// Where the next fetch starts
    pub next_cursor: Cursor,

    /// Ids of the fetched findings, in fetch order
    pub finding_ids: Vec<String>,
}

/// Fetch findings created since `previous` (or since the configured first
/// fetch) and convert them to incidents.
///
/// Errors from the client propagate unchanged. Nothing is persisted or
/// archived here; see [`poll`].
pub async fn fetch_incidents<C>(
    client: &C,
    options: &FetchOptions,
    previous: Option<Cursor>,
) -> Result<FetchOutcome>
where
    C: SecurityHubApi + ?Sized,
{
    let now = Utc::now();
    let since = match previous {
        Some(cursor) => cursor,
        None => Cursor::new(first_fetch_start(&options.first_fetch, now)?),
    };

    debug!("Fetching findings created since {}", since);
    let findings = fetch_all_findings(client, options.findings_request(since, now)).await?;

    let mut latest: Option<Cursor> = None;
    let mut incidents = Vec::with_capacity(findings.len());
    for finding in &findings {
        let created_at = finding.created_at_utc()?;
        latest = Some(match latest {
            Some(cursor) => cursor.advance_past(created_at),
            None => Cursor::past(created_at),
        });
        incidents.push(Incident::from_finding(finding)?);
    }
    // With nothing fetched the window start carries over unchanged
    let next_cursor = latest.unwrap_or(since);

    info!(
        "Fetched {} incident(s); next fetch starts at {}",
        incidents.len(),
        next_cursor
    );

    Ok(FetchOutcome {
        incidents,
        next_cursor,
        finding_ids: findings.into_iter().map(|f| f.id).collect(),
    })
}

/// Run one poll against the run-state store: read the cursor, fetch, persist
/// the new cursor, then archive the fetched findings if configured.
///
/// A failed fetch or a failed cursor write leaves the stored cursor as it was
/// and nothing is archived, so the same findings come back on the next poll.
/// Archiving happens only once the cursor is stored; an archive failure is
/// logged and the fetched incidents are still returned.
pub async fn poll<C, S>(client: &C, store: &S, options: &FetchOptions) -> Result<FetchOutcome>
where
    C: SecurityHubApi + ?Sized,
    S: RunStateStore + ?Sized,
{
    let previous = store
        .get_last_run()?
        .map(|last_run| last_run.cursor())
        .transpose()?;

    let outcome = fetch_incidents(client, options, previous).await?;
    store.set_last_run(&LastRun::from(outcome.next_cursor))?;

    if options.archive_fetched && !outcome.finding_ids.is_empty() {
        if let Err(err) = archive_findings(client, &outcome.finding_ids).await {
            warn!(
                "Failed to archive {} fetched finding(s): {}",
                outcome.finding_ids.len(),
                err
            );
        }
    }

    Ok(outcome)
}

/// Mark the given findings ARCHIVED.
async fn archive_findings<C>(client: &C, ids: &[String]) -> Result<()>
where
    C: SecurityHubApi + ?Sized,
{
    let mut filters = FindingFilters::new();
    for id in ids {
        push_filter(&mut filters, "Id", StringFilter::equals(id));
    }

    debug!("Archiving {} fetched finding(s)", ids.len());
    client
        .update_findings(&UpdateFindingsRequest {
            filters,
            record_state: Some("ARCHIVED".to_string()),
        })
        .await
}
