//! The sync-in and sync-out phases bracketing a claude session
//!
//! Sync-in materializes the current branch's storage into the working
//! tree before claude runs; sync-out captures edits back into storage
//! after it exits. Both phases are whole-file, last-writer-wins copies
//! with no rollback: the first failure aborts the phase and whatever was
//! already copied stays.

use std::collections::HashSet;
use std::fs;

use anyhow::Context;

use crate::copy;
use crate::error::Result;
use crate::exclude;
use crate::session::Session;
use crate::storage::{self, BRANCHES_DIR, DELETION_MARKER};

/// True for entries that hold user content rather than bookkeeping state.
fn is_user_entry(item: &str) -> bool {
    item != DELETION_MARKER && item != BRANCHES_DIR
}

/// Materialize the current branch's storage into the working tree.
///
/// Initializes storage on first use, then copies every user entry into
/// the repository at the same relative path and registers it in the git
/// exclude list. The deletion marker and `branches/` never leave storage.
///
/// # Errors
///
/// Returns an error on the first failing copy or exclude update.
pub fn sync_in(session: &Session) -> Result<()> {
    storage::initialize(session)?;

    let items = storage::list_dir(&session.store_location)?;

    for item in items.iter().filter(|item| is_user_entry(item)) {
        let src = session.store_location.join(item);
        let dst = session.repo_root.join(item);
        copy::copy_path(&src, &dst).with_context(|| format!("Failed to copy {item}"))?;

        exclude::add_entry(&session.repo_root, item)
            .with_context(|| format!("Failed to update exclude for {item}"))?;
    }

    Ok(())
}

/// Capture working-tree edits back into the current branch's storage.
///
/// Every managed entry still present on disk is copied into storage;
/// entries listed but deleted during the session are silently skipped.
/// Storage entries that dropped out of the managed list are then pruned,
/// leaving the deletion marker and `branches/` untouched.
///
/// # Errors
///
/// Returns an error if storage cannot be created or any copy or removal
/// fails.
pub fn sync_out(session: &Session) -> Result<()> {
    let entries = exclude::read_entries(&session.repo_root)?;

    fs::create_dir_all(&session.store_location).with_context(|| {
        format!(
            "Failed to create storage: {}",
            session.store_location.display()
        )
    })?;

    for item in &entries {
        let src = session.repo_root.join(item);
        if !src.exists() {
            continue; // deleted during the session
        }

        let dst = session.store_location.join(item);
        copy::copy_path(&src, &dst)
            .with_context(|| format!("Failed to copy {item} to storage"))?;
    }

    let managed: HashSet<&str> = entries.iter().map(String::as_str).collect();

    for item in storage::list_dir(&session.store_location)? {
        if !is_user_entry(&item) || managed.contains(item.as_str()) {
            continue;
        }

        let path = session.store_location.join(&item);
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.with_context(|| format!("Failed to remove {item} from storage"))?;
    }

    Ok(())
}
