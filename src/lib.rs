//! # ccbranch
//!
//! Core library for the branch-aware Claude Code wrapper.
//!
//! ccbranch keeps per-git-branch "personal" files (local notes, scratch
//! config, private instructions) out of version control: each branch gets
//! its own storage directory under `~/.workspaces/<repo>` that is synced
//! into the working tree before `claude` runs and captured back after it
//! exits. Storage for branches deleted from git is reclaimed after a
//! grace period.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the ccbranch library
pub mod error {
    /// Result type alias using `anyhow::Error`
    pub type Result<T> = anyhow::Result<T>;
}

/// Branch name to storage segment mapping
pub mod branch;

/// Command-line argument capture
pub mod cli;

/// Configuration file discovery and merging
pub mod config;

/// Recursive file and directory copying
pub mod copy;

/// Git exclude list bookkeeping
pub mod exclude;

/// Thin wrappers around the `git` CLI
pub mod git;

/// Launching the wrapped `claude` binary
pub mod launcher;

/// Deleted-branch storage reclamation
pub mod retention;

/// Per-invocation session context
pub mod session;

/// Per-branch storage resolution and initialization
pub mod storage;

/// The sync-in and sync-out phases
pub mod sync;
