// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! In-memory object store
//!
//! A small commit graph held in memory. The history walk follows the same
//! rule as the git2 store: always emit the pending commit with the newest
//! committer timestamp next.

use crate::commit::CommitId;
use crate::error::GitError;
use crate::store::{History, ObjectStore};
use crate::tags::TagRef;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone)]
struct MemoryCommit {
    committed: DateTime<Utc>,
    parents: Vec<CommitId>,
}

/// Commit graph, tags and named refs held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    commits: HashMap<CommitId, MemoryCommit>,
    tags: Vec<TagRef>,
    refs: HashMap<String, CommitId>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-branch history, `ids` given oldest first
    ///
    /// Commits are one minute apart and `HEAD` points at the last one.
    #[must_use]
    pub fn linear(ids: &[CommitId]) -> Self {
        let mut store = Self::new();
        let epoch = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default();
        let mut parent = None;
        for (i, id) in ids.iter().enumerate() {
            let minutes = i64::try_from(i).unwrap_or(i64::MAX);
            store.add_commit(*id, epoch + Duration::minutes(minutes), parent);
            parent = Some(*id);
        }
        if let Some(head) = parent {
            store.set_ref("HEAD", head);
        }
        store
    }

    /// Add (or replace) a commit
    ///
    /// Parents need not exist yet; a walk that reaches a missing parent
    /// yields `GitError::UnknownCommit`.
    pub fn add_commit(
        &mut self,
        id: CommitId,
        committed: DateTime<Utc>,
        parents: impl IntoIterator<Item = CommitId>,
    ) {
        self.commits.insert(
            id,
            MemoryCommit {
                committed,
                parents: parents.into_iter().collect(),
            },
        );
    }

    /// Tag a known commit; tags are listed in the order they were added
    ///
    /// # Errors
    ///
    /// Returns `GitError::UnknownCommit` if `target` has not been added.
    pub fn add_tag(&mut self, name: impl Into<String>, target: CommitId) -> Result<(), GitError> {
        if !self.commits.contains_key(&target) {
            return Err(GitError::UnknownCommit { id: target });
        }
        self.tags.push(TagRef::new(name, target));
        Ok(())
    }

    /// Point a named ref (`HEAD`, a branch name) at a commit
    pub fn set_ref(&mut self, name: impl Into<String>, target: CommitId) {
        self.refs.insert(name.into(), target);
    }

    /// Number of commits in the store
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    fn commit(&self, id: CommitId) -> Result<&MemoryCommit, GitError> {
        self.commits.get(&id).ok_or(GitError::UnknownCommit { id })
    }
}

impl ObjectStore for MemoryStore {
    fn resolve(&self, reference: &str) -> Result<CommitId, GitError> {
        let found = self
            .refs
            .get(reference)
            .copied()
            .or_else(|| {
                self.tags
                    .iter()
                    .rev()
                    .find(|t| t.name == reference)
                    .map(|t| t.target)
            })
            .or_else(|| CommitId::from_hex(reference).ok())
            .filter(|id| self.commits.contains_key(id));

        found.ok_or_else(|| GitError::InvalidReference {
            reference: reference.to_string(),
        })
    }

    fn list_tags(&self) -> Result<Vec<TagRef>, GitError> {
        Ok(self.tags.clone())
    }

    fn history_from(&self, start: CommitId) -> Result<History<'_>, GitError> {
        let first = self.commit(start)?;
        let mut queue = BinaryHeap::new();
        queue.push((first.committed, start));
        Ok(Box::new(MemoryHistory {
            store: self,
            queue,
            seen: HashSet::from([start]),
            failed: false,
        }))
    }
}

/// Committer-time ordered walk over a [`MemoryStore`]
struct MemoryHistory<'a> {
    store: &'a MemoryStore,
    queue: BinaryHeap<(DateTime<Utc>, CommitId)>,
    seen: HashSet<CommitId>,
    failed: bool,
}

impl Iterator for MemoryHistory<'_> {
    type Item = Result<CommitId, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (_, id) = self.queue.pop()?;
        // Only the start commit is checked up front, parents are checked here
        let commit = match self.store.commit(id) {
            Ok(commit) => commit,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        for parent in &commit.parents {
            if self.seen.insert(*parent) {
                match self.store.commits.get(parent) {
                    Some(p) => self.queue.push((p.committed, *parent)),
                    // Dangling parents sort last and fail when reached
                    None => self.queue.push((DateTime::<Utc>::MIN_UTC, *parent)),
                }
            }
        }
        Some(Ok(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn ids(n: u8) -> Vec<CommitId> {
        (1..=n).map(CommitId::filled).collect()
    }

    fn walk(store: &MemoryStore, start: CommitId) -> Vec<CommitId> {
        store
            .history_from(start)
            .expect("history")
            .collect::<Result<Vec<_>, _>>()
            .expect("walk")
    }

    #[test]
    fn test_linear_walk_newest_first() {
        let ids = ids(5);
        let store = MemoryStore::linear(&ids);
        let walked = walk(&store, ids[4]);
        let expected: Vec<_> = ids.iter().rev().copied().collect();
        assert_eq!(walked, expected);
    }

    #[test]
    fn test_walk_from_middle() {
        let ids = ids(5);
        let store = MemoryStore::linear(&ids);
        assert_eq!(walk(&store, ids[2]), vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_merge_walk_interleaves_by_time() {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let [root, a, b, merge] = [1u8, 2, 3, 4].map(CommitId::filled);
        let mut store = MemoryStore::new();
        store.add_commit(root, base, []);
        store.add_commit(a, base + Duration::minutes(2), [root]);
        store.add_commit(b, base + Duration::minutes(1), [root]);
        store.add_commit(merge, base + Duration::minutes(3), [a, b]);

        // root is reachable twice but emitted once
        assert_eq!(walk(&store, merge), vec![merge, a, b, root]);
    }

    #[test]
    fn test_history_from_unknown_commit() {
        let store = MemoryStore::linear(&ids(2));
        let result = store.history_from(CommitId::filled(0xee));
        assert!(matches!(result, Err(GitError::UnknownCommit { .. })));
    }

    #[test]
    fn test_dangling_parent_fails_mid_walk() {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let head = CommitId::filled(1);
        let missing = CommitId::filled(2);
        let mut store = MemoryStore::new();
        store.add_commit(head, base, [missing]);

        let mut history = store.history_from(head).expect("history");
        assert_eq!(history.next().map(|r| r.ok()), Some(Some(head)));
        assert!(matches!(
            history.next(),
            Some(Err(GitError::UnknownCommit { id })) if id == missing
        ));
        assert!(history.next().is_none());
    }

    #[test]
    fn test_resolve_refs_tags_and_hex() {
        let ids = ids(3);
        let mut store = MemoryStore::linear(&ids);
        store.add_tag("v1", ids[0]).expect("tag");
        store.set_ref("main", ids[1]);

        assert_eq!(store.resolve("HEAD").expect("HEAD"), ids[2]);
        assert_eq!(store.resolve("main").expect("main"), ids[1]);
        assert_eq!(store.resolve("v1").expect("v1"), ids[0]);
        assert_eq!(store.resolve(&ids[1].to_string()).expect("hex"), ids[1]);
        assert!(matches!(
            store.resolve("nope"),
            Err(GitError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_add_tag_unknown_commit() {
        let mut store = MemoryStore::new();
        assert!(store.add_tag("v1", CommitId::filled(9)).is_err());
    }

    #[test]
    fn test_list_tags_keeps_insertion_order() {
        let ids = ids(2);
        let mut store = MemoryStore::linear(&ids);
        store.add_tag("b", ids[0]).expect("tag");
        store.add_tag("a", ids[1]).expect("tag");
        let names: Vec<_> = store
            .list_tags()
            .expect("tags")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(store.commit_count(), 2);
    }
}
