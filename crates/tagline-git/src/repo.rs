// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! On-disk repositories
//!
//! This module implements [`ObjectStore`] for a repository opened with the
//! `git2` crate.

use crate::commit::CommitId;
use crate::error::GitError;
use crate::store::{History, ObjectStore};
use crate::tags::TagRef;
use git2::{ErrorCode, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// A git repository wrapper used as an object store
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Wrap an already opened repository
    #[must_use]
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the HEAD commit id
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved (for example in an
    /// empty repository).
    pub fn head(&self) -> Result<CommitId, GitError> {
        self.resolve("HEAD")
    }
}

impl ObjectStore for GitRepo {
    fn resolve(&self, reference: &str) -> Result<CommitId, GitError> {
        let invalid = || GitError::InvalidReference {
            reference: reference.to_string(),
        };
        let obj = self.repo.revparse_single(reference).map_err(|_| invalid())?;
        let commit = obj.peel_to_commit().map_err(|_| invalid())?;
        Ok(commit.id().into())
    }

    fn list_tags(&self) -> Result<Vec<TagRef>, GitError> {
        let mut tags = Vec::new();
        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.shorthand() else {
                debug!("Skipping tag with non UTF-8 name");
                continue;
            };
            // Annotated tags point at a tag object, peel through to the commit
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id().into())),
                // Tags of trees or blobs
                Err(e) if matches!(e.code(), ErrorCode::Peel | ErrorCode::InvalidSpec) => {
                    debug!(tag = name, error = %e, "Skipping tag that does not mark a commit");
                }
                // Dangling or unreadable targets mean the repository is damaged
                Err(e) => return Err(e.into()),
            }
        }
        Ok(tags)
    }

    fn history_from(&self, start: CommitId) -> Result<History<'_>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(start.oid())?;
        Ok(Box::new(revwalk.map(|oid| {
            oid.map(CommitId::from).map_err(GitError::from)
        })))
    }
}
