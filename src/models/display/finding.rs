//! Finding display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Finding;
use crate::output::formatters::{or_dash, truncate_string};

/// Finding display model for the findings table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FindingDisplay {
    /// Finding ID
    #[tabled(rename = "ID")]
    pub id: String,

    /// Severity label
    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    /// Product that reported the finding
    #[tabled(rename = "PRODUCT")]
    pub product: String,

    #[tabled(rename = "ACCOUNT")]
    pub account: String,

    #[tabled(rename = "CREATED")]
    pub created_at: String,

    /// ACTIVE or ARCHIVED
    #[tabled(rename = "STATE")]
    pub record_state: String,
}

impl From<&Finding> for FindingDisplay {
    fn from(finding: &Finding) -> Self {
        Self {
            id: truncate_string(&finding.id, 40),
            severity: or_dash(finding.severity_label().as_deref()),
            title: truncate_string(finding.title.as_deref().unwrap_or("--"), 50),
            product: or_dash(finding.product_name.as_deref()),
            account: or_dash(finding.aws_account_id.as_deref()),
            created_at: finding.created_at.clone(),
            record_state: or_dash(finding.record_state.as_deref()),
        }
    }
}
