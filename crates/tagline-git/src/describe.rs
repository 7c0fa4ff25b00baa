// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Describing commits relative to the nearest tag
//!
//! [`Describer`] walks history from a starting commit, newest committer
//! time first, and stops at the first commit that carries a tag. The number
//! of commits passed on the way is the distance.

use crate::commit::CommitId;
use crate::error::{DescribeError, GitError};
use crate::store::ObjectStore;
use crate::tags::TagIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::{debug, trace};

/// Default length of the hash suffix
pub const DEFAULT_ABBREV: usize = 8;

/// Which commit the hash suffix abbreviates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbbrevSource {
    /// The tagged commit the walk stopped at
    #[default]
    TagTarget,
    /// The commit the walk started from, as `git describe` does
    Start,
}

/// Options controlling a describe walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Length of the hash suffix
    pub abbrev: usize,
    /// Commit abbreviated in the suffix
    pub abbrev_source: AbbrevSource,
    /// Give up after this many untagged commits
    pub max_distance: Option<usize>,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            abbrev: DEFAULT_ABBREV,
            abbrev_source: AbbrevSource::TagTarget,
            max_distance: None,
        }
    }
}

impl DescribeOptions {
    /// Set the suffix length
    #[must_use]
    pub fn abbrev(mut self, len: usize) -> Self {
        self.abbrev = len;
        self
    }

    /// Abbreviate the starting commit instead of the tagged one
    #[must_use]
    pub fn abbrev_start(mut self) -> Self {
        self.abbrev_source = AbbrevSource::Start;
        self
    }

    /// Bound the walk
    #[must_use]
    pub fn max_distance(mut self, limit: usize) -> Self {
        self.max_distance = Some(limit);
        self
    }
}

/// Outcome of a successful describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Short name of the nearest tag
    pub tag: String,
    /// Commits walked before reaching the tagged one
    pub distance: usize,
    /// The tagged commit
    pub tag_target: CommitId,
    /// The commit the walk started from
    pub start: CommitId,
    /// Hash suffix, empty when `distance` is zero
    pub abbrev: String,
}

impl Description {
    /// True when the starting commit is itself tagged
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{}-{}-{}", self.tag, self.distance, self.abbrev)
        }
    }
}

/// Describes commits of one store against that store's tags
///
/// The tag index is built on first use and kept for the lifetime of the
/// describer. Once built it is never written again, so a `Describer` over a
/// `Sync` store can be shared between threads; readers of a built index take
/// no lock.
pub struct Describer<S> {
    store: S,
    options: DescribeOptions,
    tags: OnceLock<TagIndex>,
    // Held only while the index is being built
    building: Mutex<()>,
}

impl<S: ObjectStore> Describer<S> {
    /// Create a describer with default options
    pub fn new(store: S) -> Self {
        Self::with_options(store, DescribeOptions::default())
    }

    /// Create a describer with explicit options
    pub fn with_options(store: S, options: DescribeOptions) -> Self {
        Self {
            store,
            options,
            tags: OnceLock::new(),
            building: Mutex::new(()),
        }
    }

    /// Use a tag index built elsewhere instead of enumerating the store
    #[must_use]
    pub fn with_tag_index(self, index: TagIndex) -> Self {
        let tags = OnceLock::new();
        let _ = tags.set(index);
        Self { tags, ..self }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The options in effect
    pub fn options(&self) -> &DescribeOptions {
        &self.options
    }

    /// The tag index, if it has been built
    pub fn tag_index(&self) -> Option<&TagIndex> {
        self.tags.get()
    }

    /// Build the tag index now rather than on the first describe
    ///
    /// # Errors
    ///
    /// Returns `DescribeError::TagEnumeration` if the store cannot list tags.
    pub fn prime(&self) -> Result<&TagIndex, DescribeError> {
        if let Some(index) = self.tags.get() {
            return Ok(index);
        }
        // The guarded data is (), so a poisoned lock carries no broken state
        let _guard = self
            .building
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = self.tags.get() {
            return Ok(index);
        }
        let index = TagIndex::build(&self.store)
            .map_err(|source| DescribeError::TagEnumeration { source })?;
        Ok(self.tags.get_or_init(|| index))
    }

    /// Describe the commit a revision points at
    ///
    /// # Errors
    ///
    /// - `DescribeError::HistoryUnavailable` if the revision cannot be
    ///   resolved or its history read
    /// - `DescribeError::TagEnumeration` if tags cannot be listed
    /// - `DescribeError::NoReachableTag` if no tagged commit is reachable
    /// - `DescribeError::DistanceLimitExceeded` if the walk hits `max_distance`
    pub fn describe(&self, reference: &str) -> Result<Description, DescribeError> {
        let start = self
            .store
            .resolve(reference)
            .map_err(|source| history_unavailable(reference, source))?;
        self.walk(reference, start)
    }

    /// Describe a commit by id
    ///
    /// # Errors
    ///
    /// Same as [`Describer::describe`].
    pub fn describe_commit(&self, start: CommitId) -> Result<Description, DescribeError> {
        self.walk(&start.to_string(), start)
    }

    fn walk(&self, reference: &str, start: CommitId) -> Result<Description, DescribeError> {
        let history = self
            .store
            .history_from(start)
            .map_err(|source| history_unavailable(reference, source))?;
        let index = self.prime()?;

        let mut distance = 0usize;
        for commit in history {
            let id = commit.map_err(|source| history_unavailable(reference, source))?;
            if let Some(tag) = index.lookup(&id) {
                debug!(tag = %tag.name, distance, %start, "Found nearest tag");
                return Ok(self.render(tag.name.clone(), distance, tag.target, start));
            }
            trace!(commit = %id, distance, "Untagged commit");
            distance += 1;
            if let Some(limit) = self.options.max_distance {
                if distance > limit {
                    debug!(limit, %start, "Walk limit reached");
                    return Err(DescribeError::DistanceLimitExceeded { start, limit });
                }
            }
        }

        debug!(walked = distance, %start, "History exhausted without a tag");
        Err(DescribeError::NoReachableTag {
            start,
            walked: distance,
        })
    }

    fn render(
        &self,
        tag: String,
        distance: usize,
        tag_target: CommitId,
        start: CommitId,
    ) -> Description {
        let abbrev = if distance == 0 {
            String::new()
        } else {
            match self.options.abbrev_source {
                AbbrevSource::TagTarget => tag_target.abbrev(self.options.abbrev),
                AbbrevSource::Start => start.abbrev(self.options.abbrev),
            }
        };
        Description {
            tag,
            distance,
            tag_target,
            start,
            abbrev,
        }
    }
}

fn history_unavailable(reference: &str, source: GitError) -> DescribeError {
    DescribeError::HistoryUnavailable {
        reference: reference.to_string(),
        source,
    }
}
