//! Deleted-branch storage reclamation
//!
//! Mark-then-expire: the first pass that finds branch storage with no
//! live branch writes a timestamp marker; a later pass deletes the whole
//! directory once the marker is older than the grace period. A branch
//! reappearing in git cancels the pending deletion.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::branch::unsanitize_branch_name;
use crate::error::Result;
use crate::git::BranchLister;
use crate::session::Session;
use crate::storage::{BRANCHES_DIR, DELETION_MARKER};

/// Scan feature-branch storage and apply the retention policy.
///
/// The current branch is never touched, even when git does not list it
/// yet (brand-new unpushed branches). Stray non-directory files under
/// `branches/` are ignored. Individual marker or removal failures are
/// reported on stderr and do not stop the scan; the caller treats even a
/// total failure here as non-fatal for the run.
///
/// # Errors
///
/// Returns an error if the branch list or the `branches/` directory
/// cannot be read.
pub fn cleanup_deleted_branches(
    session: &Session,
    branches: &dyn BranchLister,
    grace: Duration,
) -> Result<()> {
    let branches_path = session.store_base.join(BRANCHES_DIR);
    if !branches_path.exists() {
        return Ok(());
    }

    let live = branches.live_branches()?;

    let entries = fs::read_dir(&branches_path)
        .with_context(|| format!("Failed to read directory: {}", branches_path.display()))?;

    let now = SystemTime::now();

    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read directory: {}", branches_path.display()))?;

        if !entry.path().is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy().into_owned();
        let branch_name = unsanitize_branch_name(&dir_name);
        let branch_path = branches_path.join(&dir_name);
        let marker_path = branch_path.join(DELETION_MARKER);

        if branch_name == session.current_branch {
            continue;
        }

        if live.contains(&branch_name) {
            // Revival cancels a pending deletion
            let _ = fs::remove_file(&marker_path);
            continue;
        }

        match fs::read_to_string(&marker_path) {
            Ok(data) => expire_if_overdue(&data, &branch_path, &branch_name, now, grace),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                write_marker(&marker_path, now, &branch_name);
            }
            Err(err) => {
                eprintln!("warning: failed to read deletion marker for {branch_name}: {err}");
            }
        }
    }

    Ok(())
}

/// Delete the branch directory once its marker is older than the grace
/// period. A malformed timestamp is left alone: re-marking would silently
/// reset the grace clock, so the marker stays as-is for a future pass.
fn expire_if_overdue(
    data: &str,
    branch_path: &Path,
    branch_name: &str,
    now: SystemTime,
    grace: Duration,
) {
    let Ok(timestamp) = data.trim().parse::<u64>() else {
        return;
    };

    let deleted_at = UNIX_EPOCH + Duration::from_secs(timestamp);
    let expired = now
        .duration_since(deleted_at)
        .is_ok_and(|age| age > grace);

    if expired
        && let Err(err) = fs::remove_dir_all(branch_path)
    {
        eprintln!("warning: failed to delete old branch {branch_name}: {err}");
    }
}

fn write_marker(marker_path: &Path, now: SystemTime, branch_name: &str) {
    let timestamp = now
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    if let Err(err) = fs::write(marker_path, timestamp.to_string()) {
        eprintln!("warning: failed to create deletion marker for {branch_name}: {err}");
    }
}
