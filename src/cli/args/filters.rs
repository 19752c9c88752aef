//! Filter argument types for CLI commands

use clap::Args;

use crate::client::models::SortOrder;
use crate::commands::FindingsQuery;

use super::PaginationArgs;

/// Filter arguments for `findings list`.
#[derive(Args, Debug, Default, Clone)]
pub struct FindingFilterArgs {
    /// Attribute filters: name=<n>,value=<v>,comparison=<c>[;name=...]
    #[arg(long, short = 'f')]
    pub filters: Option<String>,

    /// Comma-separated resource ids
    #[arg(long)]
    pub resource_ids: Option<String>,

    /// Record state (ACTIVE, ARCHIVED)
    #[arg(long)]
    pub record_state: Option<String>,

    /// Severity label (INFORMATIONAL, LOW, MEDIUM, HIGH, CRITICAL)
    #[arg(long)]
    pub severity: Option<String>,

    /// Field to sort by (e.g. CreatedAt)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, value_enum, hide_possible_values = true)]
    pub sort_dir: Option<SortOrder>,
}

impl FindingFilterArgs {
    /// Combine with paging arguments into a findings query.
    pub fn to_query(&self, pagination: &PaginationArgs) -> FindingsQuery {
        FindingsQuery {
            filters: self.filters.clone(),
            resource_ids: self.resource_ids.clone(),
            record_state: self.record_state.clone(),
            severity_label: self.severity.clone(),
            sort_field: self.sort_by.clone(),
            sort_order: self.sort_dir,
            max_results: pagination.max_results,
            next_token: pagination.next_token.clone(),
        }
    }
}
