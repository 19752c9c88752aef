//! Test fixtures for Security Hub models

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::models::{Finding, RawMember};

/// The minimal finding shape the service returns for a product integration.
pub fn sample_finding() -> Finding {
    serde_json::from_value(json!({
        "ProductArn": "Test",
        "Description": "Test",
        "SchemaVersion": "2021-05-27",
        "CreatedAt": "2020-03-22T13:22:13.933Z",
        "Id": "Id",
        "Severity": {
            "Normalized": 0,
        },
    }))
    .expect("fixture finding is valid")
}

/// A titled finding with the given id, creation time and normalized severity.
pub fn finding(id: &str, created_at: &str, normalized: u32) -> Finding {
    serde_json::from_value(json!({
        "Id": id,
        "Title": format!("Finding {}", id),
        "ProductArn": "arn:aws:securityhub:us-east-1::product/aws/guardduty",
        "ProductName": "GuardDuty",
        "AwsAccountId": "123456789012",
        "CreatedAt": created_at,
        "UpdatedAt": created_at,
        "RecordState": "ACTIVE",
        "Severity": {"Normalized": normalized},
        "Types": ["TTPs/Initial Access"],
    }))
    .expect("fixture finding is valid")
}

/// A member account with both timestamps set to 2022-01-01T12:00:00.
pub fn sample_member() -> RawMember {
    let time_val = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
    RawMember {
        account_id: None,
        email: None,
        administrator_id: None,
        member_status: None,
        invited_at: Some(time_val),
        updated_at: Some(time_val),
        extra: Default::default(),
    }
}

/// A fully populated member account.
pub fn member(account_id: &str, status: &str) -> RawMember {
    RawMember {
        account_id: Some(account_id.to_string()),
        email: Some(format!("security+{}@example.com", account_id)),
        administrator_id: Some("999999999999".to_string()),
        member_status: Some(status.to_string()),
        ..sample_member()
    }
}
