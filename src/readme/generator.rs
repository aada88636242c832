//! End-to-end README generation.
//!
//! Chains the account lookup, the contributions query, aggregation and
//! rendering. Every call is independent and sequential; the first failure ends
//! the run without any partial document.

use log::{error, info};
use std::collections::BTreeMap;

use super::renderer::ReadmeRenderer;
use crate::contributions::{aggregate, RepositorySets};
use crate::github::{build_contributions_query, ContributionSource, GitHubError};
use crate::i18n::Translator;
use crate::utils::datetime;

/// Why a generation run produced no document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    /// The account creation year query returned API errors.
    #[error("Account lookup failed: {0}")]
    Lookup(String),

    /// The contributions query returned API errors.
    #[error("Contribution fetch failed: {0}")]
    Fetch(String),

    /// A response could not be parsed or lacked expected fields.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request did not complete (network, HTTP status, rejected token).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GenerationFailure {
    fn classify(err: GitHubError) -> Self {
        match err {
            GitHubError::Lookup(message) => Self::Lookup(message),
            GitHubError::Fetch(message) => Self::Fetch(message),
            GitHubError::Malformed(message) => Self::Malformed(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeOutcome {
    /// At least one repository was found.
    Rendered { document: String, sets: RepositorySets },
    /// The account is valid but has no public contributions; the document holds
    /// only the title.
    NoContributions { document: String },
    /// Nothing was rendered.
    Failed(GenerationFailure),
}

impl ReadmeOutcome {
    /// Markdown text, or an empty string for a failed run.
    pub fn markdown(&self) -> &str {
        match self {
            ReadmeOutcome::Rendered { document, .. } | ReadmeOutcome::NoContributions { document } => document,
            ReadmeOutcome::Failed(_) => "",
        }
    }

    /// Repository sets; empty unless the run rendered at least one repository.
    pub fn sets(&self) -> RepositorySets {
        match self {
            ReadmeOutcome::Rendered { sets, .. } => sets.clone(),
            _ => RepositorySets::default(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReadmeOutcome::Failed(_))
    }

    /// Document and repository sets; both empty for a failed run.
    pub fn into_parts(self) -> (String, RepositorySets) {
        match self {
            ReadmeOutcome::Rendered { document, sets } => (document, sets),
            ReadmeOutcome::NoContributions { document } => (document, RepositorySets::default()),
            ReadmeOutcome::Failed(_) => (String::new(), RepositorySets::default()),
        }
    }
}

/// Drives a [`ContributionSource`] through the full pipeline.
pub struct ReadmeGenerator<S> {
    source: S,
    current_year: Option<i32>,
}

impl<S: ContributionSource> ReadmeGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current_year: None,
        }
    }

    /// Pin the current year instead of reading the clock.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Check credentials against the source.
    pub async fn validate(&self, username: &str, token: &str) -> bool {
        self.source.authenticate(username, token).await
    }

    /// Generate the README for `username`.
    pub async fn generate(
        &self,
        username: &str,
        token: &str,
        comments: &BTreeMap<String, String>,
        translator: &dyn Translator,
    ) -> ReadmeOutcome {
        info!("🔄 Generating README for {username}");

        let creation_year = match self.source.fetch_account_creation_year(username, token).await {
            Ok(year) => year,
            Err(e) => {
                error!("❌ Failed to look up creation year: {e}");
                return ReadmeOutcome::Failed(GenerationFailure::classify(e));
            }
        };

        let current_year = self.current_year.unwrap_or_else(datetime::current_year);
        let request = build_contributions_query(creation_year, current_year);

        let payload = match self.source.fetch_contributions(username, token, &request).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ Failed to fetch contributions: {e}");
                return ReadmeOutcome::Failed(GenerationFailure::classify(e));
            }
        };

        let sets = aggregate(&payload);
        info!(
            "✅ Aggregated {} repositories ({} commit only, {} pull request, {} other)",
            sets.len(),
            sets.commit_only.len(),
            sets.pull_request.len(),
            sets.other.len()
        );

        let document = ReadmeRenderer::new(translator).render(username, &sets, comments);
        if sets.is_empty() {
            ReadmeOutcome::NoContributions { document }
        } else {
            ReadmeOutcome::Rendered { document, sets }
        }
    }
}
