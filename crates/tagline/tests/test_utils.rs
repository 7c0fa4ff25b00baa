// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for tagline integration tests
//!
//! Scaffolds throwaway git repositories with deterministic commit times.

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// A temporary git repository, removed when dropped
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
    clock: i64,
}

impl TestRepo {
    /// Initialize an empty repository
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        Self {
            dir,
            repo,
            clock: 1_700_000_000,
        }
    }

    /// Repository working directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit `n` times on HEAD, returning the ids oldest first
    pub fn commits(&mut self, n: usize) -> Vec<Oid> {
        (0..n).map(|i| self.commit(&format!("commit {i}"))).collect()
    }

    /// Commit once on HEAD
    pub fn commit(&mut self, message: &str) -> Oid {
        self.clock += 60;
        let sig = Signature::new("Test Author", "test@example.com", &Time::new(self.clock, 0))
            .expect("Failed to build signature");
        let tree_id = self
            .repo
            .index()
            .and_then(|mut index| index.write_tree())
            .expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
    }

    /// Create a lightweight tag
    pub fn tag(&self, name: &str, target: Oid) {
        let obj = self
            .repo
            .find_object(target, None)
            .expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create tag");
    }

    /// Write a tag ref pointing at an object that does not exist
    pub fn dangling_tag(&self, name: &str) {
        let tags_dir = self.repo.path().join("refs").join("tags");
        std::fs::create_dir_all(&tags_dir).expect("Failed to create tags dir");
        std::fs::write(tags_dir.join(name), format!("{}\n", "deadbeef".repeat(5)))
            .expect("Failed to write dangling tag");
    }
}

/// First `len` hex characters of an oid
pub fn short(oid: Oid, len: usize) -> String {
    oid.to_string()[..len].to_string()
}
