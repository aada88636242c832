//! Wire types for GitHub GraphQL responses.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Generic GraphQL response envelope.
///
/// The presence of `errors`, even alongside `data`, marks the whole response
/// as failed.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

/// Join error messages for logging and error variants.
pub fn join_errors(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "empty error list".to_string();
    }
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerData {
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Viewer {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreationData {
    pub user: Option<UserCreation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreation {
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsData {
    pub user: Option<ContributionPayload>,
}

/// The `user` object of a contributions response.
///
/// Keys are response keys: `contributionsCollection` for the current year and
/// `contributionsCollection{year}` for historical years. A `null` value stands
/// for a block with no data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionPayload {
    #[serde(flatten)]
    pub collections: BTreeMap<String, Option<ContributionCollection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionCollection {
    pub commit_contributions_by_repository: Vec<RepositoryContribution>,
    pub pull_request_contributions_by_repository: Vec<RepositoryContribution>,
    pub issue_contributions_by_repository: Vec<RepositoryContribution>,
    pub pull_request_review_contributions_by_repository: Vec<RepositoryContribution>,
    pub repository_contributions: RepositoryContributionConnection,
}

impl ContributionCollection {
    pub fn is_empty(&self) -> bool {
        self.commit_contributions_by_repository.is_empty()
            && self.pull_request_contributions_by_repository.is_empty()
            && self.issue_contributions_by_repository.is_empty()
            && self.pull_request_review_contributions_by_repository.is_empty()
            && self.repository_contributions.edges.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryContribution {
    pub repository: RepositoryNode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryContributionConnection {
    #[serde(default)]
    pub edges: Vec<RepositoryContributionEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryContributionEdge {
    pub node: RepositoryContribution,
}

/// Repository as returned by the API, flags included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name_with_owner: String,
    pub url: String,
    pub is_private: bool,
    pub is_fork: bool,
}
