//! Repository models and contribution aggregation.
//!
//! The aggregator reduces a raw [`ContributionPayload`](crate::github::ContributionPayload)
//! into three disjoint [`RepositorySets`], which the README renderer turns into
//! document sections.

pub mod aggregator;

pub use aggregator::aggregate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::github::types::RepositoryNode;

/// Repository identity as it appears in the generated document.
///
/// Ordering is by `full_name` first, so iterating a set of references yields
/// the document order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub full_name: String,
    pub url: String,
}

impl RepositoryRef {
    pub fn new(full_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            url: url.into(),
        }
    }
}

impl From<&RepositoryNode> for RepositoryRef {
    fn from(node: &RepositoryNode) -> Self {
        Self::new(node.name_with_owner.clone(), node.url.clone())
    }
}

/// Document section a repository is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CommitOnly,
    PullRequest,
    Other,
}

impl Category {
    /// Section order in the generated document.
    pub const ALL: [Category; 3] = [Category::CommitOnly, Category::PullRequest, Category::Other];

    /// Translation key of the section heading.
    pub fn translation_key(self) -> &'static str {
        match self {
            Category::CommitOnly => crate::constants::KEY_COMMIT_ONLY,
            Category::PullRequest => crate::constants::KEY_PULL_REQUESTS,
            Category::Other => crate::constants::KEY_OTHER_CONTRIBUTIONS,
        }
    }
}

/// The three disjoint repository categories.
///
/// A repository with both commit and pull request contributions is a
/// pull request repository only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySets {
    pub commit_only: BTreeSet<RepositoryRef>,
    pub pull_request: BTreeSet<RepositoryRef>,
    pub other: BTreeSet<RepositoryRef>,
}

impl RepositorySets {
    /// Build the categories from the working sets collected during aggregation.
    ///
    /// `all` is expected to contain both `commits` and `pull_requests`.
    pub fn from_working_sets(
        commits: &BTreeSet<RepositoryRef>,
        pull_requests: &BTreeSet<RepositoryRef>,
        all: &BTreeSet<RepositoryRef>,
    ) -> Self {
        Self {
            commit_only: commits.difference(pull_requests).cloned().collect(),
            pull_request: pull_requests.clone(),
            other: all
                .iter()
                .filter(|repo| !commits.contains(repo) && !pull_requests.contains(repo))
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, category: Category) -> &BTreeSet<RepositoryRef> {
        match category {
            Category::CommitOnly => &self.commit_only,
            Category::PullRequest => &self.pull_request,
            Category::Other => &self.other,
        }
    }

    /// Category holding the repository named `full_name`, if any.
    pub fn category_of(&self, full_name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.get(*category).iter().any(|repo| repo.full_name == full_name))
    }

    /// Categories with their repositories, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<RepositoryRef>)> {
        Category::ALL.into_iter().map(move |category| (category, self.get(category)))
    }

    /// Union of all three categories.
    pub fn all(&self) -> BTreeSet<RepositoryRef> {
        self.commit_only
            .iter()
            .chain(&self.pull_request)
            .chain(&self.other)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commit_only.len() + self.pull_request.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
