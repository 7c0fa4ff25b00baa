//! Commit identities

use crate::error::GitError;
use git2::Oid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a full hex commit id
pub const SHA_HEX_LEN: usize = 40;

/// Content-addressed identity of a commit
///
/// Serializes as its 40-character lowercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(Oid);

impl CommitId {
    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == SHA_HEX_LEN && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Parse a full 40-character hex id
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if `sha` is not 40 hex characters.
    pub fn from_hex(sha: &str) -> Result<Self, GitError> {
        if !Self::is_valid_sha(sha) {
            return Err(GitError::InvalidReference {
                reference: sha.to_string(),
            });
        }
        Ok(Self(Oid::from_str(sha)?))
    }

    /// Build an id from its 20 raw bytes
    ///
    /// # Errors
    ///
    /// Returns `GitError::Git2` if `bytes` is not exactly 20 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GitError> {
        Ok(Self(Oid::from_bytes(bytes)?))
    }

    /// An id with every byte set to `byte`, for synthetic histories
    #[must_use]
    pub fn filled(byte: u8) -> Self {
        Self::from_array([byte; 20])
    }

    /// A distinct synthetic id per `n`, never the all-zero id
    ///
    /// The big-endian `n + 1` fills the trailing eight bytes.
    #[must_use]
    pub fn from_index(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.wrapping_add(1).to_be_bytes());
        Self::from_array(bytes)
    }

    fn from_array(bytes: [u8; 20]) -> Self {
        match Oid::from_bytes(&bytes) {
            Ok(oid) => Self(oid),
            // libgit2 only rejects slices whose length is not 20
            Err(e) => unreachable!("20-byte oid rejected: {e}"),
        }
    }

    /// Raw bytes of the id
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The underlying git2 oid
    #[must_use]
    pub fn oid(&self) -> Oid {
        self.0
    }

    /// Hex prefix of `len` characters, clamped to `1..=40`
    #[must_use]
    pub fn abbrev(&self, len: usize) -> String {
        let mut hex = self.0.to_string();
        hex.truncate(len.clamp(1, SHA_HEX_LEN));
        hex
    }
}

impl From<Oid> for CommitId {
    fn from(oid: Oid) -> Self {
        Self(oid)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CommitId {
    type Error = GitError;

    fn try_from(sha: String) -> Result<Self, Self::Error> {
        Self::from_hex(&sha)
    }
}

impl FromStr for CommitId {
    type Err = GitError;

    fn from_str(sha: &str) -> Result<Self, Self::Err> {
        Self::from_hex(sha)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
