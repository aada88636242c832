//! Reduction of contribution payloads into repository categories.

use log::debug;
use std::collections::BTreeSet;

use super::{RepositoryRef, RepositorySets};
use crate::github::query::CURRENT_COLLECTION_KEY;
use crate::github::types::{ContributionCollection, ContributionPayload, RepositoryNode};

/// Working sets filled while walking the payload.
#[derive(Default)]
struct WorkingSets {
    commits: BTreeSet<RepositoryRef>,
    pull_requests: BTreeSet<RepositoryRef>,
    all: BTreeSet<RepositoryRef>,
}

impl WorkingSets {
    fn admit(node: &RepositoryNode) -> Option<RepositoryRef> {
        (!node.is_private && !node.is_fork).then(|| RepositoryRef::from(node))
    }

    fn add_commit(&mut self, node: &RepositoryNode) {
        if let Some(repo) = Self::admit(node) {
            self.all.insert(repo.clone());
            self.commits.insert(repo);
        }
    }

    fn add_pull_request(&mut self, node: &RepositoryNode) {
        if let Some(repo) = Self::admit(node) {
            self.all.insert(repo.clone());
            self.pull_requests.insert(repo);
        }
    }

    fn add_other(&mut self, node: &RepositoryNode) {
        if let Some(repo) = Self::admit(node) {
            self.all.insert(repo);
        }
    }

    fn add_collection(&mut self, collection: &ContributionCollection, is_current_year: bool) {
        for item in &collection.commit_contributions_by_repository {
            self.add_commit(&item.repository);
        }
        for item in &collection.pull_request_contributions_by_repository {
            self.add_pull_request(&item.repository);
        }

        // Issues and reviews are only requested for the current year
        if is_current_year {
            for item in &collection.issue_contributions_by_repository {
                self.add_other(&item.repository);
            }
            for item in &collection.pull_request_review_contributions_by_repository {
                self.add_other(&item.repository);
            }
        }

        for edge in &collection.repository_contributions.edges {
            self.add_other(&edge.node.repository);
        }
    }
}

/// Reduce a contributions payload to the three repository categories.
///
/// Only public, non-fork repositories are kept. Keys not starting with
/// `contributionsCollection` and `null` blocks are ignored.
pub fn aggregate(payload: &ContributionPayload) -> RepositorySets {
    let mut working = WorkingSets::default();

    for (key, collection) in &payload.collections {
        if !key.starts_with(CURRENT_COLLECTION_KEY) {
            continue;
        }
        let Some(collection) = collection else {
            continue;
        };
        if collection.is_empty() {
            continue;
        }

        let is_current_year = key == CURRENT_COLLECTION_KEY;
        debug!("Aggregating {key} (current year: {is_current_year})");
        working.add_collection(collection, is_current_year);
    }

    RepositorySets::from_working_sets(&working.commits, &working.pull_requests, &working.all)
}
