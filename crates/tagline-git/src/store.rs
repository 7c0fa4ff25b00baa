// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The object store seam
//!
//! [`Describer`](crate::describe::Describer) never touches a repository
//! directly. Everything it needs from one comes through [`ObjectStore`]:
//! resolving a revision, listing tags, and walking history.

use crate::commit::CommitId;
use crate::error::GitError;
use crate::tags::TagRef;

/// Lazy history sequence, newest committer timestamp first
///
/// Forward-only and not restartable. `None` marks exhaustion; an `Err`
/// item means the store failed mid-walk.
pub type History<'a> = Box<dyn Iterator<Item = Result<CommitId, GitError>> + 'a>;

/// A source of commits and tags
pub trait ObjectStore {
    /// Resolve a revision (`HEAD`, branch, tag, hex id) to the commit it names
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the revision does not name a commit.
    fn resolve(&self, reference: &str) -> Result<CommitId, GitError>;

    /// Every tag in the store, each paired with the commit it marks
    ///
    /// # Errors
    ///
    /// Returns `GitError` if tag metadata cannot be read.
    fn list_tags(&self) -> Result<Vec<TagRef>, GitError>;

    /// History reachable from `start`, ordered by descending committer time
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `start` is unknown or the walk cannot begin.
    fn history_from(&self, start: CommitId) -> Result<History<'_>, GitError>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn resolve(&self, reference: &str) -> Result<CommitId, GitError> {
        (**self).resolve(reference)
    }

    fn list_tags(&self) -> Result<Vec<TagRef>, GitError> {
        (**self).list_tags()
    }

    fn history_from(&self, start: CommitId) -> Result<History<'_>, GitError> {
        (**self).history_from(start)
    }
}
