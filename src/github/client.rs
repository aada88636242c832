//! GitHub GraphQL client backed by `reqwest`.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::query::{build_creation_query, build_viewer_query, GraphQlRequest};
use super::types::{join_errors, ContributionPayload, ContributionsData, CreationData, GraphQlResponse, ViewerData};
use super::{ContributionSource, GitHubError};
use crate::config::ApiConfig;
use crate::constants::GITHUB_GRAPHQL_URL;
use crate::utils::datetime;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    endpoint: Url,
}

impl GitHubClient {
    /// Create a client for the public GitHub endpoint.
    pub fn new() -> Result<Self, GitHubError> {
        Self::with_endpoint(GITHUB_GRAPHQL_URL)
    }

    /// Create a client for a custom endpoint (GitHub Enterprise, test servers).
    pub fn with_endpoint(endpoint: &str) -> Result<Self, GitHubError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| GitHubError::Network(format!("Invalid endpoint '{endpoint}': {e}")))?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, GitHubError> {
        Self::with_endpoint(&config.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST a request and decode the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        token: &str,
        request: &GraphQlRequest,
    ) -> Result<GraphQlResponse<T>, GitHubError> {
        debug!("POST {} ({})", self.endpoint, request.document.operation_name);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, format!("bearer {token}"))
            .json(&request.body())
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| GitHubError::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(GitHubError::Authentication(body));
        }
        if !status.is_success() {
            return Err(GitHubError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| GitHubError::Malformed(e.to_string()))
    }
}

/// Reject any response carrying an error list, then require `data`.
fn into_data<T>(response: GraphQlResponse<T>, on_errors: fn(String) -> GitHubError) -> Result<T, GitHubError> {
    if let Some(errors) = response.errors {
        return Err(on_errors(join_errors(&errors)));
    }
    response
        .data
        .ok_or_else(|| GitHubError::Malformed("response has neither data nor errors".to_string()))
}

#[async_trait]
impl ContributionSource for GitHubClient {
    async fn authenticate(&self, _username: &str, token: &str) -> bool {
        let response = match self.execute::<ViewerData>(token, &build_viewer_query()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("❌ Credential check failed: {e}");
                return false;
            }
        };

        match into_data(response, GitHubError::Authentication) {
            Ok(data) => {
                let login = data.viewer.and_then(|viewer| viewer.login).unwrap_or_default();
                if login.is_empty() {
                    warn!("❌ Credential check returned no login");
                    false
                } else {
                    info!("✅ Authenticated as {login}");
                    true
                }
            }
            Err(e) => {
                warn!("❌ Credential check failed: {e}");
                false
            }
        }
    }

    async fn fetch_account_creation_year(&self, username: &str, token: &str) -> Result<i32, GitHubError> {
        let request = build_creation_query().bind_login(username);
        let data = into_data(self.execute::<CreationData>(token, &request).await?, GitHubError::Lookup)
            .inspect_err(|e| error!("❌ Failed to look up account {username}: {e}"))?;

        let created_at = data
            .user
            .ok_or_else(|| GitHubError::Malformed(format!("no user object for '{username}'")))?
            .created_at;

        let year = datetime::parse_year(&created_at)
            .map_err(|e| GitHubError::Malformed(format!("invalid createdAt '{created_at}': {e}")))?;
        info!("✅ Account {username} created in {year}");
        Ok(year)
    }

    async fn fetch_contributions(
        &self,
        username: &str,
        token: &str,
        request: &GraphQlRequest,
    ) -> Result<ContributionPayload, GitHubError> {
        let request = request.bind_login(username);
        let data = into_data(self.execute::<ContributionsData>(token, &request).await?, GitHubError::Fetch)
            .inspect_err(|e| error!("❌ Failed to fetch contributions for {username}: {e}"))?;

        let payload = data
            .user
            .ok_or_else(|| GitHubError::Malformed(format!("no user object for '{username}'")))?;
        info!("✅ Fetched {} contribution collections", payload.collections.len());
        Ok(payload)
    }
}
