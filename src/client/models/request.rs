//! Request and response envelopes for the findings endpoints

use serde::{Deserialize, Serialize};

use super::filter::FindingFilters;
use super::finding::Finding;

/// Body of `POST /findings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetFindingsRequest {
    #[serde(skip_serializing_if = "FindingFilters::is_empty")]
    pub filters: FindingFilters,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort_criteria: Vec<SortCriterion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Response of `POST /findings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetFindingsResponse {
    #[serde(default)]
    pub findings: Vec<Finding>,

    #[serde(default)]
    pub next_token: Option<String>,
}

/// Sort order for findings queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One `SortCriteria` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SortCriterion {
    pub field: String,
    pub sort_order: SortOrder,
}

/// Body of `PATCH /findings` (UpdateFindings).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateFindingsRequest {
    pub filters: FindingFilters,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_state: Option<String>,
}

/// Query of `GET /members`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMembersRequest {
    pub only_associated: Option<bool>,
    pub max_results: Option<u32>,
    pub next_token: Option<String>,
}

impl ListMembersRequest {
    /// Query-string pairs for the request, omitting unset parameters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(only_associated) = self.only_associated {
            pairs.push(("OnlyAssociated", only_associated.to_string()));
        }
        if let Some(max_results) = self.max_results {
            pairs.push(("MaxResults", max_results.to_string()));
        }
        if let Some(ref token) = self.next_token {
            pairs.push(("NextToken", token.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{StringFilter, push_filter};

    #[test]
    fn test_empty_request_serializes_to_empty_object() {
        let json = serde_json::to_value(GetFindingsRequest::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_request_serialization() {
        let mut request = GetFindingsRequest {
            max_results: Some(50),
            sort_criteria: vec![SortCriterion {
                field: "CreatedAt".to_string(),
                sort_order: SortOrder::Asc,
            }],
            ..Default::default()
        };
        push_filter(&mut request.filters, "RecordState", StringFilter::equals("ACTIVE"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Filters": {"RecordState": [{"Value": "ACTIVE", "Comparison": "EQUALS"}]},
                "SortCriteria": [{"Field": "CreatedAt", "SortOrder": "asc"}],
                "MaxResults": 50
            })
        );
    }

    #[test]
    fn test_response_without_next_token() {
        let json = r#"{"Findings": [{"Id": "a", "CreatedAt": "2020-03-22T13:22:13.933Z"}]}"#;
        let response: GetFindingsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.findings.len(), 1);
        assert!(response.next_token.is_none());
    }

    #[test]
    fn test_list_members_query_pairs() {
        let request = ListMembersRequest {
            only_associated: Some(false),
            max_results: Some(10),
            next_token: None,
        };

        assert_eq!(
            request.query_pairs(),
            vec![
                ("OnlyAssociated", "false".to_string()),
                ("MaxResults", "10".to_string())
            ]
        );
    }
}
