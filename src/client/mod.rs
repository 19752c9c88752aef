//! Security Hub API client

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod securityhub;

#[cfg(test)]
pub use mock::MockSecurityHubClient;
pub use securityhub::SecurityHubClient;

use models::{
    GetFindingsRequest, GetFindingsResponse, GetMembersResponse, ListMembersRequest,
    ListMembersResponse, UpdateFindingsRequest,
};

/// The Security Hub capabilities hubpoll consumes.
///
/// Implemented by [`SecurityHubClient`] over HTTP and by the mock client in
/// tests. Errors are returned as-is; callers decide whether to retry.
#[async_trait]
pub trait SecurityHubApi: Send + Sync {
    /// Fetch one page of findings matching the request.
    async fn get_findings(&self, request: &GetFindingsRequest) -> Result<GetFindingsResponse>;

    /// Update findings matched by the request filters.
    async fn update_findings(&self, request: &UpdateFindingsRequest) -> Result<()>;

    /// List member accounts of the administrator account.
    async fn list_members(&self, request: &ListMembersRequest) -> Result<ListMembersResponse>;

    /// Fetch member details for specific account ids.
    async fn get_members(&self, account_ids: &[String]) -> Result<GetMembersResponse>;

    /// Add tags to a Security Hub resource.
    async fn tag_resource(&self, resource_arn: &str, tags: &BTreeMap<String, String>)
    -> Result<()>;
}
