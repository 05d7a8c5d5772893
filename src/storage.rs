//! Per-branch storage resolution and lazy initialization
//!
//! Default-branch storage is the repository's storage root itself, with
//! no named segment. Every other branch gets an isolated directory under
//! `branches/`, named by its sanitized branch name and seeded from the
//! default branch's user content on first use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::branch::sanitize_branch_name;
use crate::copy;
use crate::error::Result;
use crate::session::Session;

/// Subdirectory of the storage root holding feature-branch storage.
pub const BRANCHES_DIR: &str = "branches";

/// Marker file recording when a branch was first seen deleted from git.
pub const DELETION_MARKER: &str = ".deleted_at";

/// Storage location for `current`: the base root itself on the default
/// branch, otherwise `<base>/branches/<sanitized name>`.
#[must_use]
pub fn resolve_location(store_base: &Path, current: &str, default: &str) -> PathBuf {
    if current == default {
        store_base.to_path_buf()
    } else {
        store_base
            .join(BRANCHES_DIR)
            .join(sanitize_branch_name(current))
    }
}

/// Create and seed the current branch's storage on first use.
///
/// No-op on the default branch or when the location already exists, so a
/// branch's own edits are never clobbered by a later seed from default.
/// Seeding copies user content only; `branches/` and the deletion marker
/// stay behind. Without default-branch storage the new location starts
/// empty.
///
/// # Errors
///
/// Returns an error if directories cannot be created or seeding fails.
pub fn initialize(session: &Session) -> Result<()> {
    if session.on_default_branch() {
        return Ok(());
    }

    if session.store_location.exists() {
        return Ok(());
    }

    fs::create_dir_all(&session.store_location).with_context(|| {
        format!(
            "Failed to create storage: {}",
            session.store_location.display()
        )
    })?;

    if session.store_base.exists() {
        for item in list_dir(&session.store_base)? {
            if item == BRANCHES_DIR || item == DELETION_MARKER {
                continue;
            }

            let src = session.store_base.join(&item);
            let dst = session.store_location.join(&item);
            copy::copy_path(&src, &dst)
                .with_context(|| format!("Failed to copy {item} from default branch storage"))?;
        }
    }

    Ok(())
}

/// Names of the direct entries of `path`; empty when `path` is absent.
///
/// # Errors
///
/// Returns an error if `path` exists but cannot be read.
pub fn list_dir(path: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read directory: {}", path.display()));
        }
    };

    let mut items = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", path.display()))?;
        items.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(items)
}
