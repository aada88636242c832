#![allow(dead_code)]

use async_trait::async_trait;
use contrib_readme::github::{ContributionPayload, ContributionSource, GitHubError, GraphQlRequest};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Repository contribution entry as returned by the API.
pub fn repo(name: &str, is_private: bool, is_fork: bool) -> Value {
    json!({
        "repository": {
            "nameWithOwner": name,
            "url": url(name),
            "isPrivate": is_private,
            "isFork": is_fork,
        }
    })
}

pub fn public(name: &str) -> Value {
    repo(name, false, false)
}

pub fn url(name: &str) -> String {
    format!("https://github.com/{name}")
}

/// Contribution collection block.
pub fn collection(commits: &[Value], prs: &[Value], issues: &[Value], reviews: &[Value], direct: &[Value]) -> Value {
    let edges: Vec<Value> = direct.iter().map(|entry| json!({ "node": entry })).collect();
    json!({
        "commitContributionsByRepository": commits,
        "pullRequestContributionsByRepository": prs,
        "issueContributionsByRepository": issues,
        "pullRequestReviewContributionsByRepository": reviews,
        "repositoryContributions": { "edges": edges },
    })
}

pub fn empty_collection() -> Value {
    collection(&[], &[], &[], &[], &[])
}

pub fn payload(blocks: Vec<(&str, Value)>) -> ContributionPayload {
    let object: serde_json::Map<String, Value> = blocks.into_iter().map(|(key, value)| (key.to_string(), value)).collect();
    serde_json::from_value(Value::Object(object)).expect("valid payload")
}

/// In-memory contribution source.
///
/// `creation_year: None` simulates an API error on the account lookup,
/// `payload: None` an API error on the contributions query.
pub struct FakeSource {
    pub authenticated: bool,
    pub creation_year: Option<i32>,
    pub payload: Option<Value>,
    pub requests: Mutex<Vec<GraphQlRequest>>,
}

impl FakeSource {
    pub fn new(creation_year: Option<i32>, payload: Option<Value>) -> Self {
        Self {
            authenticated: true,
            creation_year,
            payload,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            authenticated: false,
            ..Self::new(Some(2020), Some(json!({})))
        }
    }

    pub fn recorded_requests(&self) -> Vec<GraphQlRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContributionSource for FakeSource {
    async fn authenticate(&self, _username: &str, _token: &str) -> bool {
        self.authenticated
    }

    async fn fetch_account_creation_year(&self, username: &str, _token: &str) -> Result<i32, GitHubError> {
        self.creation_year
            .ok_or_else(|| GitHubError::Lookup(format!("Could not resolve to a User with the login of '{username}'.")))
    }

    async fn fetch_contributions(
        &self,
        username: &str,
        _token: &str,
        request: &GraphQlRequest,
    ) -> Result<ContributionPayload, GitHubError> {
        self.requests.lock().unwrap().push(request.bind_login(username));
        match &self.payload {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| GitHubError::Malformed(e.to_string())),
            None => Err(GitHubError::Fetch("Something went wrong".to_string())),
        }
    }
}
