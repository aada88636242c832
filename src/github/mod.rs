//! GitHub API abstraction layer.
//!
//! This module defines the [`ContributionSource`] interface the README pipeline
//! depends on, the error taxonomy for API calls, and the GraphQL query builder.
//! [`GitHubClient`] is the production implementation.

use async_trait::async_trait;

pub mod client;
pub mod query;
pub mod types;

pub use client::GitHubClient;
pub use query::{build_contributions_query, GraphQlRequest};
pub use types::ContributionPayload;

/// Error types for GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Account lookup failed: {0}")]
    Lookup(String),

    #[error("Contribution fetch failed: {0}")]
    Fetch(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Source of account metadata and contribution payloads.
///
/// Every call is independent: implementations hold no per-user state between
/// calls, and callers treat any error as terminal for the current invocation.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Check the token with a viewer identity query.
    ///
    /// Returns `true` only when the response carries no errors and a non-empty
    /// login. Failures of any kind yield `false`.
    async fn authenticate(&self, username: &str, token: &str) -> bool;

    /// Year in which the account was created.
    async fn fetch_account_creation_year(&self, username: &str, token: &str) -> Result<i32, GitHubError>;

    /// Execute a contributions query built by
    /// [`build_contributions_query`] with `$login` bound to `username`.
    async fn fetch_contributions(
        &self,
        username: &str,
        token: &str,
        request: &GraphQlRequest,
    ) -> Result<ContributionPayload, GitHubError>;
}
