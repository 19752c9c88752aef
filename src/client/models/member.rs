//! Member account models

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Member account as returned by `ListMembers` / `GetMembers`, with native
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrator_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_status: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub invited_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Member account with timestamps rendered as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrator_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw `ListMembers` response. `ResponseMetadata` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMembersResponse {
    #[serde(default)]
    pub members: Vec<RawMember>,

    #[serde(default)]
    pub next_token: Option<String>,
}

/// Raw `GetMembers` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMembersResponse {
    #[serde(default)]
    pub members: Vec<RawMember>,

    #[serde(default)]
    pub unprocessed_accounts: Vec<UnprocessedAccount>,
}

/// Account the service could not process in a batch member call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnprocessedAccount {
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub processing_result: Option<String>,
}

/// Accept timestamps as RFC 3339 strings, offset-less ISO strings (read as
/// UTC) or epoch seconds, the wire default for REST-JSON timestamps.
fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Text(String),
        Epoch(f64),
    }

    match Option::<Timestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Timestamp::Text(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
            })
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", s, e))),
        Some(Timestamp::Epoch(secs)) => {
            let millis = (secs * 1000.0).round() as i64;
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", secs)))
        }
    }
}
