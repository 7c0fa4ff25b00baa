// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tag references and the commit-to-tag index

use crate::commit::CommitId;
use crate::error::GitError;
use crate::store::ObjectStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A named tag and the commit it marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    /// Short tag name (`v1.0`, not `refs/tags/v1.0`)
    pub name: String,
    /// The tagged commit
    pub target: CommitId,
}

impl TagRef {
    /// Create a tag reference
    #[must_use]
    pub fn new(name: impl Into<String>, target: CommitId) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// Lookup from a tagged commit to its tag
///
/// When several tags mark the same commit, the one seen last during
/// enumeration wins. Enumeration order belongs to the store, so with
/// duplicate targets the chosen name is only as stable as that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    by_target: HashMap<CommitId, TagRef>,
}

impl TagIndex {
    /// Enumerate every tag in `store` and index it by target
    ///
    /// # Errors
    ///
    /// Returns the store's `GitError` if the tags cannot be listed.
    pub fn build<S: ObjectStore + ?Sized>(store: &S) -> Result<Self, GitError> {
        let tags = store.list_tags()?;
        let listed = tags.len();
        let index = Self::from_tags(tags);
        debug!(
            listed,
            indexed = index.len(),
            "Built tag index"
        );
        Ok(index)
    }

    /// Index an already enumerated tag list, last entry wins
    #[must_use]
    pub fn from_tags(tags: impl IntoIterator<Item = TagRef>) -> Self {
        let by_target = tags.into_iter().map(|t| (t.target, t)).collect();
        Self { by_target }
    }

    /// The tag marking `id`, if any
    #[must_use]
    pub fn lookup(&self, id: &CommitId) -> Option<&TagRef> {
        self.by_target.get(id)
    }

    /// Number of tagged commits
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    /// True when no commit is tagged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    /// Iterate over indexed tags in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &TagRef> {
        self.by_target.values()
    }
}
