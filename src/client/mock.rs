//! Mock Security Hub client for testing
//!
//! Provides an in-memory implementation of [`SecurityHubApi`] for unit tests
//! without making real API calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SecurityHubApi;
use super::models::{
    Finding, GetFindingsRequest, GetFindingsResponse, GetMembersResponse, ListMembersRequest,
    ListMembersResponse, RawMember, UpdateFindingsRequest,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSecurityHubClient::new()
///     .with_findings(vec![fixtures::finding("f-1", "2020-03-22T13:22:13.933Z", 40)])
///     .await;
///
/// let response = mock.get_findings(&GetFindingsRequest::default()).await?;
/// assert_eq!(response.findings.len(), 1);
/// ```
#[derive(Default)]
pub struct MockSecurityHubClient {
    /// Pages of findings; page N > 0 is reached with next token `page-N`
    finding_pages: Arc<Mutex<Vec<Vec<Finding>>>>,
    /// Response returned from list_members
    members: Arc<Mutex<ListMembersResponse>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by update_findings only - consumed on first use
    update_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured findings requests
    findings_requests: Arc<Mutex<Vec<GetFindingsRequest>>>,
    /// Captured update requests
    update_requests: Arc<Mutex<Vec<UpdateFindingsRequest>>>,
    /// Captured tag calls (resource ARN, tags)
    tag_requests: Arc<Mutex<Vec<(String, BTreeMap<String, String>)>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_findings: usize,
    pub update_findings: usize,
    pub list_members: usize,
    pub get_members: usize,
    pub tag_resource: usize,
}

impl MockSecurityHubClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a single page of findings.
    pub async fn with_findings(self, findings: Vec<Finding>) -> Self {
        *self.finding_pages.lock().await = vec![findings];
        self
    }

    /// Configure multiple pages of findings linked by next tokens.
    pub async fn with_finding_pages(self, pages: Vec<Vec<Finding>>) -> Self {
        *self.finding_pages.lock().await = pages;
        self
    }

    /// Configure members to return from list_members and get_members.
    pub async fn with_members(self, members: Vec<RawMember>) -> Self {
        self.members.lock().await.members = members;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next update_findings call only.
    pub async fn with_update_error(self, error: ApiError) -> Self {
        *self.update_error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured findings requests.
    pub async fn findings_requests(&self) -> Vec<GetFindingsRequest> {
        self.findings_requests.lock().await.clone()
    }

    /// Get all captured update requests.
    pub async fn update_requests(&self) -> Vec<UpdateFindingsRequest> {
        self.update_requests.lock().await.clone()
    }

    /// Get all captured tag calls.
    pub async fn tag_requests(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.tag_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        match error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecurityHubApi for MockSecurityHubClient {
    async fn get_findings(&self, request: &GetFindingsRequest) -> Result<GetFindingsResponse> {
        self.findings_requests.lock().await.push(request.clone());
        self.call_count.lock().await.get_findings += 1;
        self.check_error().await?;

        let page_idx = match request.next_token.as_deref() {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid NextToken {}", token)))?,
        };

        let pages = self.finding_pages.lock().await;
        let findings = pages.get(page_idx).cloned().unwrap_or_default();
        let next_token = (page_idx + 1 < pages.len()).then(|| format!("page-{}", page_idx + 1));

        Ok(GetFindingsResponse {
            findings,
            next_token,
        })
    }

    async fn update_findings(&self, request: &UpdateFindingsRequest) -> Result<()> {
        self.update_requests.lock().await.push(request.clone());
        self.call_count.lock().await.update_findings += 1;
        if let Some(e) = self.update_error.lock().await.take() {
            return Err(e.into());
        }
        self.check_error().await
    }

    async fn list_members(&self, _request: &ListMembersRequest) -> Result<ListMembersResponse> {
        self.call_count.lock().await.list_members += 1;
        self.check_error().await?;

        Ok(self.members.lock().await.clone())
    }

    async fn get_members(&self, account_ids: &[String]) -> Result<GetMembersResponse> {
        self.call_count.lock().await.get_members += 1;
        self.check_error().await?;

        let members = self
            .members
            .lock()
            .await
            .members
            .iter()
            .filter(|m| {
                m.account_id
                    .as_ref()
                    .is_some_and(|id| account_ids.contains(id))
            })
            .cloned()
            .collect();

        Ok(GetMembersResponse {
            members,
            unprocessed_accounts: Vec::new(),
        })
    }

    async fn tag_resource(
        &self,
        resource_arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.tag_requests
            .lock()
            .await
            .push((resource_arn.to_string(), tags.clone()));
        self.call_count.lock().await.tag_resource += 1;
        self.check_error().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[tokio::test]
    async fn test_mock_returns_configured_findings() {
        let mock = MockSecurityHubClient::new()
            .with_findings(vec![fixtures::sample_finding()])
            .await;

        let response = mock
            .get_findings(&GetFindingsRequest::default())
            .await
            .unwrap();

        assert_eq!(response.findings.len(), 1);
        assert!(response.next_token.is_none());
        assert_eq!(mock.call_counts().await.get_findings, 1);
    }

    #[tokio::test]
    async fn test_mock_pages_are_linked_by_token() {
        let mock = MockSecurityHubClient::new()
            .with_finding_pages(vec![
                vec![fixtures::finding("a", "2021-01-01T00:00:00Z", 10)],
                vec![fixtures::finding("b", "2021-01-02T00:00:00Z", 10)],
            ])
            .await;

        let first = mock
            .get_findings(&GetFindingsRequest::default())
            .await
            .unwrap();
        assert_eq!(first.next_token.as_deref(), Some("page-1"));

        let second = mock
            .get_findings(&GetFindingsRequest {
                next_token: first.next_token,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.findings[0].id, "b");
        assert!(second.next_token.is_none());
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed() {
        let mock = MockSecurityHubClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_members(&ListMembersRequest::default()).await.is_err());
        assert!(mock.list_members(&ListMembersRequest::default()).await.is_ok());
    }
}
