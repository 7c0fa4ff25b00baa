// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tagline-git: describe commits relative to their nearest tag
//!
//! This library crate finds the nearest tagged commit behind a starting
//! point and renders the relationship as a version-like label, without
//! invoking the `git` binary.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use tagline_git::{Describer, GitRepo};
//!
//! let repo = GitRepo::discover(".").expect("open repo");
//! let describer = Describer::new(repo);
//!
//! match describer.describe("HEAD") {
//!     Ok(description) => println!("{description}"),
//!     Err(e) if e.is_no_tag() => println!("untagged"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod commit;
pub mod describe;
pub mod error;
pub mod memory;
pub mod repo;
pub mod store;
pub mod tags;

pub use commit::CommitId;
pub use describe::{AbbrevSource, DescribeOptions, Describer, Description};
pub use error::{DescribeError, GitError};
pub use memory::MemoryStore;
pub use repo::GitRepo;
pub use store::{History, ObjectStore};
pub use tags::{TagIndex, TagRef};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitId;
    pub use crate::describe::{DescribeOptions, Describer, Description};
    pub use crate::error::{DescribeError, GitError};
    pub use crate::repo::GitRepo;
    pub use crate::store::ObjectStore;
}
