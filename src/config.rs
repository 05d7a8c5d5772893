//! Configuration file discovery and merging
//!
//! Two locations, project over global:
//! 1. `<repo>/.ccbranch.yml`
//! 2. `<config_dir>/ccbranch/config.yml`
//!
//! All fields are optional; unset fields fall back to built-in defaults
//! at resolution time. Set fields in the project file override the
//! global file field-by-field.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Project-level config file name, looked up at the repository root.
pub const PROJECT_CONFIG: &str = ".ccbranch.yml";

/// Days a deleted branch's storage is retained before reclamation.
pub const DEFAULT_GRACE_DAYS: u64 = 7;

/// Merged wrapper configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding per-repository storage (default `~/.workspaces`)
    #[serde(default)]
    pub workspaces_dir: Option<PathBuf>,

    /// Grace period in days before deleted-branch storage is reclaimed
    #[serde(default)]
    pub grace_days: Option<u64>,

    /// Override for the repository's default branch name
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Binary to invoke (default `claude`)
    #[serde(default)]
    pub claude_bin: Option<String>,
}

impl Config {
    /// Load and merge configuration for a repository.
    ///
    /// The global config is read first, then the project file at
    /// `repo_root` (when given) overrides it field-by-field. Absent
    /// files are fine; present but unreadable or unparsable files are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or
    /// parsed.
    pub fn load(repo_root: Option<&Path>) -> Result<Self> {
        let mut merged = Self::default();

        if let Some(global) = Self::global_config_path()
            && global.is_file()
        {
            merged.merge_from(Self::parse_file(&global)?);
        }

        if let Some(root) = repo_root {
            let project = root.join(PROJECT_CONFIG);
            if project.is_file() {
                merged.merge_from(Self::parse_file(&project)?);
            }
        }

        Ok(merged)
    }

    /// Root directory holding per-repository storage.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn workspaces_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.workspaces_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".workspaces"))
    }

    /// Retention grace period for deleted-branch storage.
    #[must_use]
    pub fn grace_period(&self) -> Duration {
        let days = self.grace_days.unwrap_or(DEFAULT_GRACE_DAYS);
        Duration::from_secs(days * 24 * 60 * 60)
    }

    /// Binary name or path to invoke as the wrapped program.
    #[must_use]
    pub fn claude_bin(&self) -> &str {
        self.claude_bin.as_deref().unwrap_or("claude")
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge_from(&mut self, other: Self) {
        if other.workspaces_dir.is_some() {
            self.workspaces_dir = other.workspaces_dir;
        }
        if other.grace_days.is_some() {
            self.grace_days = other.grace_days;
        }
        if other.default_branch.is_some() {
            self.default_branch = other.default_branch;
        }
        if other.claude_bin.is_some() {
            self.claude_bin = other.claude_bin;
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("ccbranch").join("config.yml"))
    }
}
