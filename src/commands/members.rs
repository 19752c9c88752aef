//! Member account commands

use log::{debug, warn};
use serde::Serialize;

use crate::client::SecurityHubApi;
use crate::client::models::{ListMembersRequest, Member, RawMember};
use crate::error::{Error, Result};
use crate::models::MemberDisplay;
use crate::output::StructuredOutput;
use crate::output::formatters::format_iso8601;
use crate::output::table::format_titled_table;
use crate::parse::parse_resource_ids;

/// Context path members are published under
pub const MEMBERS_PREFIX: &str = "AWS.SecurityHub.Members";

impl From<RawMember> for Member {
    fn from(raw: RawMember) -> Self {
        Self {
            account_id: raw.account_id,
            email: raw.email,
            administrator_id: raw.administrator_id,
            member_status: raw.member_status,
            invited_at: raw.invited_at.as_ref().map(format_iso8601),
            updated_at: raw.updated_at.as_ref().map(format_iso8601),
            extra: raw.extra,
        }
    }
}

/// Member listing with timestamps as strings. `ResponseMetadata` is not
/// carried over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMembersOutput {
    pub members: Vec<Member>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// List member accounts.
///
/// Returns the readable rendering, the structured output keyed by
/// `AccountId`, and the response with every timestamp as an ISO-8601 string.
pub async fn list_members_command<C>(
    client: &C,
    request: &ListMembersRequest,
) -> Result<(String, StructuredOutput, ListMembersOutput)>
where
    C: SecurityHubApi + ?Sized,
{
    let response = client.list_members(request).await?;
    debug!("Listed {} member(s)", response.members.len());

    let output = ListMembersOutput {
        members: response.members.into_iter().map(Member::from).collect(),
        next_token: response.next_token,
    };

    let (readable, structured) = render_members(&output.members)?;
    Ok((readable, structured, output))
}

/// Fetch specific member accounts from a comma-separated id list.
pub async fn get_members_command<C>(
    client: &C,
    account_ids: &str,
) -> Result<(String, StructuredOutput, Vec<Member>)>
where
    C: SecurityHubApi + ?Sized,
{
    let ids = parse_resource_ids(account_ids);
    if ids.is_empty() {
        return Err(Error::InvalidArgument("no account ids given".to_string()));
    }

    let response = client.get_members(&ids).await?;
    for unprocessed in &response.unprocessed_accounts {
        warn!(
            "Account {} not processed: {}",
            unprocessed.account_id.as_deref().unwrap_or("?"),
            unprocessed.processing_result.as_deref().unwrap_or("no reason given")
        );
    }

    let members: Vec<Member> = response.members.into_iter().map(Member::from).collect();
    let (readable, structured) = render_members(&members)?;
    Ok((readable, structured, members))
}

fn render_members(members: &[Member]) -> Result<(String, StructuredOutput)> {
    let rows: Vec<MemberDisplay> = members.iter().map(MemberDisplay::from).collect();
    let readable = format_titled_table("AWS SecurityHub Members", &rows);
    let structured = StructuredOutput::new(MEMBERS_PREFIX, Some("AccountId"), members)?;
    Ok((readable, structured))
}
