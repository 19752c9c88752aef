//! HTTP implementation of the Security Hub API
//!
//! Talks REST-JSON to a Security Hub compatible endpoint. Request signing is
//! not performed here: point the endpoint at LocalStack or at a signing proxy.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::SecurityHubApi;
use super::models::{
    GetFindingsRequest, GetFindingsResponse, GetMembersResponse, ListMembersRequest,
    ListMembersResponse, UpdateFindingsRequest,
};
use crate::error::{ApiError, Result};

/// Sustained request rate (GetFindings allows 3/s with bursts of 6)
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(3).unwrap();
const RATE_LIMIT_BURST: NonZeroU32 = NonZeroU32::new(6).unwrap();

/// Default wait when a throttled response carries no Retry-After header
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Security Hub REST client
pub struct SecurityHubClient {
    http: HttpClient,
    base_url: Url,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl SecurityHubClient {
    /// Create a client for `endpoint` (e.g. `https://securityhub.us-east-1.amazonaws.com`).
    pub fn new(endpoint: &str) -> Result<Self> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| ApiError::Network(format!("Invalid endpoint {:?}: {}", endpoint, e)))?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(RATE_LIMIT_PER_SECOND).allow_burst(RATE_LIMIT_BURST);

        Ok(Self {
            http,
            base_url,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded,
    /// so ARNs can be passed whole.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("Endpoint {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the JSON body, mapping error statuses to [`ApiError`].
    async fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> Result<T> {
        self.rate_limiter.until_ready().await;

        debug!("Security Hub {} request", operation);
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let body = response.text().await.map_err(ApiError::from)?;

        debug!("Security Hub {} responded {}", operation, status);

        match status {
            status if status.is_success() => {
                let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
                serde_json::from_str(body).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse {} response: {}", operation, e))
                        .into()
                })
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized(error_message(&body)).into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden(error_message(&body)).into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(error_message(&body)).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(ApiError::Throttled(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::BadRequest(error_message(&body)).into())
            }
            status if status.is_server_error() => {
                Err(ApiError::ServerError(error_message(&body)).into())
            }
            status => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code {}: {}",
                status,
                error_message(&body)
            ))
            .into()),
        }
    }
}

/// Extract the service's error message from a JSON error body, falling back
/// to the raw body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ServiceError {
        #[serde(rename = "Code", alias = "__type")]
        code: Option<String>,
        #[serde(rename = "Message", alias = "message")]
        message: Option<String>,
    }

    match serde_json::from_str::<ServiceError>(body) {
        Ok(ServiceError {
            code: Some(code),
            message: Some(message),
        }) => format!("{}: {}", code, message),
        Ok(ServiceError {
            message: Some(message),
            ..
        }) => message,
        _ if body.trim().is_empty() => "no response body".to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl SecurityHubApi for SecurityHubClient {
    async fn get_findings(&self, request: &GetFindingsRequest) -> Result<GetFindingsResponse> {
        let url = self.url(&["findings"])?;
        self.send("GetFindings", self.http.post(url).json(request))
            .await
    }

    async fn update_findings(&self, request: &UpdateFindingsRequest) -> Result<()> {
        let url = self.url(&["findings"])?;
        let _: serde_json::Value = self
            .send("UpdateFindings", self.http.patch(url).json(request))
            .await?;
        Ok(())
    }

    async fn list_members(&self, request: &ListMembersRequest) -> Result<ListMembersResponse> {
        let url = self.url(&["members"])?;
        self.send(
            "ListMembers",
            self.http.get(url).query(&request.query_pairs()),
        )
        .await
    }

    async fn get_members(&self, account_ids: &[String]) -> Result<GetMembersResponse> {
        let url = self.url(&["members", "get"])?;
        let body = serde_json::json!({ "AccountIds": account_ids });
        self.send("GetMembers", self.http.post(url).json(&body))
            .await
    }

    async fn tag_resource(
        &self,
        resource_arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        let url = self.url(&["tags", resource_arn])?;
        let body = serde_json::json!({ "Tags": tags });
        let _: serde_json::Value = self
            .send("TagResource", self.http.post(url).json(&body))
            .await?;
        Ok(())
    }
}
