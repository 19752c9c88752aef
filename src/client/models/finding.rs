//! Security Hub finding models (AWS Security Finding Format)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// A finding as returned by `GetFindings`.
///
/// Only the attributes hubpoll reads are typed. The record is kept exactly as
/// the service sent it and that record is what gets serialized, so findings
/// are handed on unchanged (explicit nulls and empty lists included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Finding {
    /// Finding identifier
    pub id: String,

    /// Creation timestamp (ISO-8601, as sent by the service)
    pub created_at: String,
    pub updated_at: Option<String>,
    pub product_arn: Option<String>,
    pub product_name: Option<String>,
    pub aws_account_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub record_state: Option<String>,
    pub workflow: Option<Workflow>,
    pub types: Vec<String>,

    raw: Map<String, Value>,
}

/// Typed view of the attributes hubpoll reads.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FindingAttributes {
    id: String,
    created_at: String,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    product_arn: Option<String>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    aws_account_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    severity: Option<Severity>,
    #[serde(default)]
    record_state: Option<String>,
    #[serde(default)]
    workflow: Option<Workflow>,
    #[serde(default, deserialize_with = "null_as_empty")]
    types: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<Map<String, Value>> for Finding {
    type Error = serde_json::Error;

    fn try_from(raw: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let attrs: FindingAttributes = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(Self {
            id: attrs.id,
            created_at: attrs.created_at,
            updated_at: attrs.updated_at,
            product_arn: attrs.product_arn,
            product_name: attrs.product_name,
            aws_account_id: attrs.aws_account_id,
            title: attrs.title,
            description: attrs.description,
            severity: attrs.severity,
            record_state: attrs.record_state,
            workflow: attrs.workflow,
            types: attrs.types,
            raw,
        })
    }
}

impl From<Finding> for Map<String, Value> {
    fn from(finding: Finding) -> Self {
        finding.raw
    }
}

impl Finding {
    /// The finding exactly as the service returned it.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Parse `CreatedAt` into a UTC instant.
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                ApiError::InvalidResponse(format!(
                    "finding {} has unparseable CreatedAt {:?}: {}",
                    self.id, self.created_at, e
                ))
                .into()
            })
    }

    /// Normalized severity (0-100), if reported.
    pub fn normalized_severity(&self) -> Option<u32> {
        self.severity.as_ref().and_then(|s| s.normalized)
    }

    /// Severity label, falling back to one derived from the normalized score.
    pub fn severity_label(&self) -> Option<String> {
        let severity = self.severity.as_ref()?;
        severity
            .label
            .clone()
            .or_else(|| severity.normalized.map(|n| label_for_normalized(n).to_string()))
    }
}

/// Map a normalized score onto the Security Hub severity labels.
pub fn label_for_normalized(normalized: u32) -> &'static str {
    match normalized {
        0 => "INFORMATIONAL",
        1..=39 => "LOW",
        40..=69 => "MEDIUM",
        70..=89 => "HIGH",
        _ => "CRITICAL",
    }
}

/// Finding severity block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Severity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<f64>,
}

/// Finding workflow block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Workflow {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINDING_JSON: &str = r#"{
        "ProductArn": "Test",
        "Description": "Test",
        "SchemaVersion": "2021-05-27",
        "CreatedAt": "2020-03-22T13:22:13.933Z",
        "Id": "Id",
        "Severity": {"Normalized": 0}
    }"#;

    #[test]
    fn test_deserialize_minimal_finding() {
        let finding: Finding = serde_json::from_str(FINDING_JSON).unwrap();

        assert_eq!(finding.id, "Id");
        assert_eq!(finding.product_arn.as_deref(), Some("Test"));
        assert_eq!(finding.normalized_severity(), Some(0));
        assert_eq!(finding.raw()["SchemaVersion"], "2021-05-27");
    }

    #[test]
    fn test_roundtrip_keeps_unmodelled_fields() {
        let original: Value = serde_json::from_str(FINDING_JSON).unwrap();
        let finding: Finding = serde_json::from_value(original.clone()).unwrap();

        assert_eq!(serde_json::to_value(&finding).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_keeps_nulls_and_empty_lists() {
        let original = serde_json::json!({
            "CreatedAt": "2020-03-22T13:22:13.933Z",
            "Id": "x",
            "Title": null,
            "Types": [],
            "Severity": {"Normalized": 40, "Label": null},
            "Workflow": {"Status": "NEW"}
        });
        let finding: Finding = serde_json::from_value(original.clone()).unwrap();

        assert!(finding.title.is_none());
        assert!(finding.types.is_empty());
        assert_eq!(finding.normalized_severity(), Some(40));
        assert_eq!(serde_json::to_value(&finding).unwrap(), original);
    }

    #[test]
    fn test_null_types_read_as_empty() {
        let finding: Finding = serde_json::from_str(
            r#"{"Id": "x", "CreatedAt": "2020-03-22T13:22:13.933Z", "Types": null}"#,
        )
        .unwrap();
        assert!(finding.types.is_empty());
    }

    #[test]
    fn test_missing_created_at_is_an_error() {
        let result = serde_json::from_str::<Finding>(r#"{"Id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_created_at_utc() {
        let finding: Finding = serde_json::from_str(FINDING_JSON).unwrap();
        let created = finding.created_at_utc().unwrap();
        assert_eq!(created.timestamp_subsec_millis(), 933);
    }

    #[test]
    fn test_created_at_utc_rejects_garbage() {
        let mut finding: Finding = serde_json::from_str(FINDING_JSON).unwrap();
        finding.created_at = "last tuesday".to_string();

        let err = finding.created_at_utc().unwrap_err();
        assert!(err.to_string().contains("last tuesday"));
    }

    #[test]
    fn test_severity_label_prefers_reported_label() {
        let mut finding: Finding = serde_json::from_str(FINDING_JSON).unwrap();
        finding.severity = Some(Severity {
            label: Some("HIGH".to_string()),
            normalized: Some(10),
            ..Default::default()
        });
        assert_eq!(finding.severity_label().as_deref(), Some("HIGH"));
    }

    #[test]
    fn test_label_for_normalized() {
        assert_eq!(label_for_normalized(0), "INFORMATIONAL");
        assert_eq!(label_for_normalized(39), "LOW");
        assert_eq!(label_for_normalized(40), "MEDIUM");
        assert_eq!(label_for_normalized(70), "HIGH");
        assert_eq!(label_for_normalized(90), "CRITICAL");
    }
}
