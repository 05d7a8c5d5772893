//! Per-invocation session context

use std::path::PathBuf;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::git;
use crate::storage;

/// Everything one invocation needs to know, resolved up front.
///
/// Constructed once per run and never persisted. Storage on disk is the
/// only state shared between invocations.
#[derive(Debug, Clone)]
pub struct Session {
    /// Working tree root of the surrounding git repository
    pub repo_root: PathBuf,
    /// Currently checked-out branch
    pub current_branch: String,
    /// The repository's default branch
    pub default_branch: String,
    /// Storage root for this repository (doubles as default-branch storage)
    pub store_base: PathBuf,
    /// Storage location for the current branch
    pub store_location: PathBuf,
}

impl Session {
    /// Resolve the session context for `repo_root`.
    ///
    /// # Errors
    ///
    /// Returns an error when not on a named branch or when the storage
    /// root cannot be determined.
    pub fn load(repo_root: PathBuf, config: &Config) -> Result<Self> {
        let current_branch = git::current_branch()?;
        let default_branch = config
            .default_branch
            .clone()
            .unwrap_or_else(git::default_branch);

        let repo_name = repo_root
            .file_name()
            .with_context(|| format!("Invalid repository root: {}", repo_root.display()))?
            .to_string_lossy()
            .into_owned();

        let store_base = config.workspaces_dir()?.join(repo_name);
        let store_location =
            storage::resolve_location(&store_base, &current_branch, &default_branch);

        Ok(Self {
            repo_root,
            current_branch,
            default_branch,
            store_base,
            store_location,
        })
    }

    /// Whether the session is on the repository's default branch.
    #[must_use]
    pub fn on_default_branch(&self) -> bool {
        self.current_branch == self.default_branch
    }
}
