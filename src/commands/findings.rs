//! Findings retrieval

use std::collections::HashSet;

use log::{debug, warn};

use crate::client::SecurityHubApi;
use crate::client::models::{
    Finding, FindingFilters, GetFindingsRequest, SortCriterion, SortOrder, StringFilter,
    extend_filters, push_filter,
};
use crate::error::Result;
use crate::models::FindingDisplay;
use crate::output::StructuredOutput;
use crate::output::table::format_titled_table;
use crate::parse::{parse_filter_field, parse_resource_ids};

/// Context path findings are published under
pub const FINDINGS_PREFIX: &str = "AWS.SecurityHub.Findings";

/// Arguments of a findings query, in their textual form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingsQuery {
    /// `name=..,value=..,comparison=..;...` filter groups
    pub filters: Option<String>,

    /// Comma-separated resource ids, matched with `ResourceId EQUALS`
    pub resource_ids: Option<String>,

    /// ACTIVE or ARCHIVED
    pub record_state: Option<String>,

    /// INFORMATIONAL, LOW, MEDIUM, HIGH or CRITICAL
    pub severity_label: Option<String>,

    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub max_results: Option<u32>,

    /// Continue from a token returned by an earlier query
    pub next_token: Option<String>,
}

impl FindingsQuery {
    /// Translate the query into a GetFindings request.
    pub fn to_request(&self) -> GetFindingsRequest {
        let mut filters = FindingFilters::new();

        if let Some(ref text) = self.filters {
            extend_filters(&mut filters, parse_filter_field(text));
        }
        if let Some(ref text) = self.resource_ids {
            for id in parse_resource_ids(text) {
                push_filter(&mut filters, "ResourceId", StringFilter::equals(id));
            }
        }
        if let Some(ref state) = self.record_state {
            push_filter(
                &mut filters,
                "RecordState",
                StringFilter::equals(state.to_uppercase()),
            );
        }
        if let Some(ref label) = self.severity_label {
            push_filter(
                &mut filters,
                "SeverityLabel",
                StringFilter::equals(label.to_uppercase()),
            );
        }

        let sort_criteria = self
            .sort_field
            .as_ref()
            .map(|field| SortCriterion {
                field: field.clone(),
                sort_order: self.sort_order.unwrap_or(SortOrder::Desc),
            })
            .into_iter()
            .collect();

        GetFindingsRequest {
            filters,
            sort_criteria,
            max_results: self.max_results,
            next_token: self.next_token.clone(),
        }
    }
}

/// Fetch every page of findings for `request`, following `NextToken`.
///
/// Stops early if the service hands back a token it already returned.
pub async fn fetch_all_findings<C>(client: &C, mut request: GetFindingsRequest) -> Result<Vec<Finding>>
where
    C: SecurityHubApi + ?Sized,
{
    let mut findings = Vec::new();
    let mut seen_tokens = HashSet::new();

    loop {
        let response = client.get_findings(&request).await?;
        debug!("Fetched page of {} finding(s)", response.findings.len());
        findings.extend(response.findings);

        match response.next_token.filter(|t| !t.is_empty()) {
            Some(token) if seen_tokens.insert(token.clone()) => request.next_token = Some(token),
            Some(token) => {
                warn!("Stopping pagination: NextToken {} repeated", token);
                break;
            }
            None => break,
        }
    }

    Ok(findings)
}

/// Run a findings query.
///
/// Returns the readable rendering, the structured output keyed by `Id`, and
/// the findings exactly as the service returned them.
pub async fn get_findings_command<C>(
    client: &C,
    query: &FindingsQuery,
) -> Result<(String, StructuredOutput, Vec<Finding>)>
where
    C: SecurityHubApi + ?Sized,
{
    let findings = fetch_all_findings(client, query.to_request()).await?;

    let rows: Vec<FindingDisplay> = findings.iter().map(FindingDisplay::from).collect();
    let readable = format_titled_table("AWS SecurityHub Findings", &rows);
    let output = StructuredOutput::new(FINDINGS_PREFIX, Some("Id"), &findings)?;

    Ok((readable, output, findings))
}
