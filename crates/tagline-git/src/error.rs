// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for tagline-git

use crate::commit::CommitId;
use thiserror::Error;

/// Errors raised by an object store
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// A commit id that the store does not know about
    #[error("Unknown commit: {id}")]
    UnknownCommit {
        /// The missing commit
        id: CommitId,
    },
}

/// Errors returned by [`Describer`](crate::describe::Describer)
#[derive(Debug, Error)]
pub enum DescribeError {
    /// The store could not list its tags
    #[error("Failed to enumerate tags: {source}")]
    TagEnumeration {
        /// Underlying store error
        #[source]
        source: GitError,
    },

    /// The starting point could not be resolved or its history read
    #[error("History unavailable from {reference}: {source}")]
    HistoryUnavailable {
        /// The reference the walk started from
        reference: String,
        /// Underlying store error
        #[source]
        source: GitError,
    },

    /// The history was exhausted without reaching a tagged commit
    #[error("No tag reachable from {start} ({walked} commits walked)")]
    NoReachableTag {
        /// The commit the walk started from
        start: CommitId,
        /// Number of commits visited
        walked: usize,
    },

    /// The walk gave up after `limit` untagged commits
    #[error("No tag within {limit} commits of {start}")]
    DistanceLimitExceeded {
        /// The commit the walk started from
        start: CommitId,
        /// The configured maximum distance
        limit: usize,
    },
}

impl DescribeError {
    /// True when the history simply carries no usable tag
    ///
    /// Callers use this to decide whether a fallback label is appropriate.
    #[must_use]
    pub fn is_no_tag(&self) -> bool {
        matches!(
            self,
            Self::NoReachableTag { .. } | Self::DistanceLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_no_tag() {
        let start = CommitId::filled(1);
        assert!(DescribeError::NoReachableTag { start, walked: 3 }.is_no_tag());
        assert!(DescribeError::DistanceLimitExceeded { start, limit: 2 }.is_no_tag());
        assert!(
            !DescribeError::TagEnumeration {
                source: GitError::InvalidReference {
                    reference: "x".to_string()
                }
            }
            .is_no_tag()
        );
    }

    #[test]
    fn test_display_messages() {
        let start = CommitId::filled(0xab);
        let err = DescribeError::NoReachableTag { start, walked: 5 };
        let msg = err.to_string();
        assert!(msg.contains("abababab"));
        assert!(msg.contains("5 commits walked"));

        let err = DescribeError::HistoryUnavailable {
            reference: "main".to_string(),
            source: GitError::InvalidReference {
                reference: "main".to_string(),
            },
        };
        assert!(err.to_string().starts_with("History unavailable from main"));
    }
}
