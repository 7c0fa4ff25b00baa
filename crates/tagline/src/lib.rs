// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tagline library
//!
//! This module exports the command's configuration and entry point for use
//! in integration tests.

pub mod config;

use std::fmt;
use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use tagline_git::{CommitId, Describer, Description, GitRepo, ObjectStore};
use tracing::{debug, info};

use crate::config::Config;

/// What the command prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Label {
    /// A tag was found
    Tagged(Description),
    /// No tag was reachable and `--always` asked for the bare commit
    Untagged {
        /// The described commit
        start: CommitId,
        /// Its abbreviated id
        abbrev: String,
    },
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged(description) => fmt::Display::fmt(description, f),
            Self::Untagged { abbrev, .. } => f.write_str(abbrev),
        }
    }
}

/// Compute the label for the configured reference
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the repository cannot
/// be opened, or describing fails (and `--always` does not apply).
pub fn label(config: &Config) -> anyhow::Result<Label> {
    config.validate()?;

    let path = config
        .repo_path()
        .context("No repository path given and the current directory is unavailable")?;
    let repo = GitRepo::discover(&path)?;
    debug!(path = %repo.path().display(), "Opened repository");

    let describer = Describer::with_options(repo, config.describe_options());
    let reference = config.reference();

    match describer.describe(reference) {
        Ok(description) => Ok(Label::Tagged(description)),
        Err(e) if config.always && e.is_no_tag() => {
            info!(reference, reason = %e, "Falling back to abbreviated commit");
            let start = describer.store().resolve(reference)?;
            Ok(Label::Untagged {
                start,
                abbrev: start.abbrev(config.abbrev()),
            })
        }
        Err(e) => Err(e).with_context(|| format!("Failed to describe {reference}")),
    }
}

/// Run the command, writing the label to `out`
///
/// # Errors
///
/// Returns an error if [`label`] fails or `out` cannot be written.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let label = label(config)?;
    if config.json {
        serde_json::to_writer(&mut *out, &label)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{label}")?;
    }
    Ok(())
}
