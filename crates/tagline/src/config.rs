// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the tagline command
//!
//! Command-line flags with environment variable fallbacks, plus the
//! conversions into library options and a log level.

use std::path::PathBuf;

use clap::Parser;
use tagline_git::commit::SHA_HEX_LEN;
use tagline_git::describe::DEFAULT_ABBREV;
use tagline_git::DescribeOptions;

/// Reference described when none is given
pub const DEFAULT_REFERENCE: &str = "HEAD";

/// Tagline - label a commit by its distance from the nearest tag
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tagline")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Revision to describe (branch, tag, SHA, `HEAD~2`, ...)
    ///
    /// Defaults to HEAD.
    pub reference: Option<String>,

    /// Path inside the repository
    ///
    /// The repository is discovered by walking up from this path.
    /// Defaults to the current working directory.
    #[arg(short = 'C', long, env = "TAGLINE_REPO")]
    pub repo: Option<PathBuf>,

    /// Number of hex digits in the hash suffix (1-40, default 8)
    #[arg(long, env = "TAGLINE_ABBREV")]
    pub abbrev: Option<usize>,

    /// Stop looking for a tag after this many commits
    #[arg(long, env = "TAGLINE_MAX_DISTANCE")]
    pub max_distance: Option<usize>,

    /// Abbreviate the described commit rather than the tagged one
    ///
    /// This matches the suffix printed by `git describe --tags`.
    #[arg(long, default_value = "false")]
    pub start_hash: bool,

    /// Print the abbreviated commit when no tag is reachable
    #[arg(long, default_value = "false")]
    pub always: bool,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout carries only the label.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// The revision to describe
    #[must_use]
    pub fn reference(&self) -> &str {
        self.reference.as_deref().unwrap_or(DEFAULT_REFERENCE)
    }

    /// Get the repository search path, using current directory as default
    ///
    /// Returns `None` if no path is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Hash suffix length
    #[must_use]
    pub fn abbrev(&self) -> usize {
        self.abbrev.unwrap_or(DEFAULT_ABBREV)
    }

    /// Library options for this configuration
    #[must_use]
    pub fn describe_options(&self) -> DescribeOptions {
        let mut options = DescribeOptions::default().abbrev(self.abbrev());
        if self.start_hash {
            options = options.abbrev_start();
        }
        if let Some(limit) = self.max_distance {
            options = options.max_distance(limit);
        }
        options
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist
    /// - The repository path is not a directory
    /// - The abbreviation length is outside 1-40
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepoPathNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepoPathNotDirectory(repo.clone()));
            }
        }

        let abbrev = self.abbrev();
        if abbrev == 0 || abbrev > SHA_HEX_LEN {
            return Err(ConfigError::AbbrevOutOfRange(abbrev));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoPathNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoPathNotDirectory(PathBuf),

    /// Abbreviation length outside 1-40
    #[error("Abbreviation length must be between 1 and 40, got {0}")]
    AbbrevOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagline_git::AbbrevSource;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.reference.is_none());
        assert!(config.repo.is_none());
        assert!(config.abbrev.is_none());
        assert!(config.max_distance.is_none());
        assert!(!config.start_hash);
        assert!(!config.always);
        assert!(!config.json);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_reference_default() {
        assert_eq!(Config::default().reference(), "HEAD");
    }

    #[test]
    fn test_reference_custom() {
        let config = Config {
            reference: Some("v1.0~3".to_string()),
            ..Default::default()
        };
        assert_eq!(config.reference(), "v1.0~3");
    }

    #[test]
    fn test_repo_path_default() {
        let config = Config::default();
        // Should fallback to current directory
        assert!(config.repo_path().is_some());
    }

    #[test]
    fn test_repo_path_custom() {
        let custom = PathBuf::from("/tmp");
        let config = Config {
            repo: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.repo_path(), Some(custom));
    }

    #[test]
    fn test_describe_options_default() {
        let options = Config::default().describe_options();
        assert_eq!(options, DescribeOptions::default());
    }

    #[test]
    fn test_describe_options_custom() {
        let config = Config {
            abbrev: Some(12),
            max_distance: Some(500),
            start_hash: true,
            ..Default::default()
        };
        let options = config.describe_options();
        assert_eq!(options.abbrev, 12);
        assert_eq!(options.max_distance, Some(500));
        assert_eq!(options.abbrev_source, AbbrevSource::Start);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::RepoPathNotFound(_))));
    }

    #[test]
    fn test_validate_abbrev_bounds() {
        for bad in [0, 41] {
            let config = Config {
                abbrev: Some(bad),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::AbbrevOutOfRange(n)) if n == bad
            ));
        }
        for good in [1, 8, 40] {
            let config = Config {
                abbrev: Some(good),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }
}
