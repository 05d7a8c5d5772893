//! Thin wrappers around the `git` CLI
//!
//! Everything here shells out; ccbranch never links a git library. When
//! repository detection or branch resolution fails, the caller drops into
//! pass-through mode and runs `claude` without any syncing.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

/// Errors from querying the local git repository.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// `git` itself could not be spawned.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git exited non-zero, e.g. outside a work tree.
    #[error("git {command} failed")]
    CommandFailed {
        /// The git subcommand that failed
        command: &'static str,
    },

    /// Detached HEAD or mid-rebase: no branch name to key storage on.
    #[error("not on a branch")]
    NotOnBranch,
}

fn git_stdout(command: &'static str, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        return Err(GitError::CommandFailed { command });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Root of the work tree surrounding the current directory.
///
/// # Errors
///
/// Returns an error when not inside a git repository.
pub fn repo_root() -> Result<PathBuf, GitError> {
    let root = git_stdout("rev-parse", &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(root))
}

/// Name of the currently checked-out branch.
///
/// # Errors
///
/// Returns [`GitError::NotOnBranch`] on a detached HEAD.
pub fn current_branch() -> Result<String, GitError> {
    let branch = git_stdout("branch", &["branch", "--show-current"])?;
    if branch.is_empty() {
        return Err(GitError::NotOnBranch);
    }
    Ok(branch)
}

/// The repository's default branch, derived from `origin/HEAD`.
///
/// Falls back to `"main"` when the remote HEAD is not set up (fresh
/// clones without a remote, local-only repositories).
#[must_use]
pub fn default_branch() -> String {
    match git_stdout("symbolic-ref", &["symbolic-ref", "refs/remotes/origin/HEAD"]) {
        Ok(git_ref) => git_ref
            .strip_prefix("refs/remotes/origin/")
            .unwrap_or(&git_ref)
            .to_string(),
        Err(_) => "main".to_string(),
    }
}

/// Source of the live branch set.
///
/// The retention manager depends on this by interface so tests can
/// substitute a fixed set instead of a real repository.
pub trait BranchLister {
    /// All local branch names currently known to version control.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch list cannot be obtained.
    fn live_branches(&self) -> crate::error::Result<HashSet<String>>;
}

/// [`BranchLister`] backed by `git branch`.
pub struct GitBranches;

impl BranchLister for GitBranches {
    fn live_branches(&self) -> crate::error::Result<HashSet<String>> {
        let output = git_stdout("branch", &["branch", "--format=%(refname:short)"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_on_branch_display() {
        assert_eq!(GitError::NotOnBranch.to_string(), "not on a branch");
    }

    #[test]
    fn test_command_failed_display() {
        let err = GitError::CommandFailed { command: "branch" };
        assert_eq!(err.to_string(), "git branch failed");
    }

    #[test]
    fn test_default_branch_never_empty() {
        // Either origin/HEAD resolves or the fallback kicks in
        assert!(!default_branch().is_empty());
    }
}
