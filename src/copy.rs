//! Recursive file and directory copying
//!
//! Whole-file replacement only: destination content is always overwritten
//! and source permission bits are replicated. No diffing, no merging.

use std::fs;
use std::path::Path;

use anyhow::Context;
use walkdir::WalkDir;

use crate::error::Result;

/// Copy a file or directory tree from `src` to `dst`.
///
/// Directories are recreated recursively (parents included); files are
/// byte-copied with the source's permission bits.
///
/// # Errors
///
/// Returns an error if `src` does not exist or any copy fails.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    let metadata =
        fs::metadata(src).with_context(|| format!("Failed to stat: {}", src.display()))?;

    if metadata.is_dir() {
        copy_dir(src, dst)
    } else {
        copy_file(src, dst)
    }
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // fs::copy truncates an existing destination and carries the source
    // permission bits over
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;

    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", src.display()))?;

        let rel_path = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Failed to strip prefix from {}", entry.path().display()))?;
        let target = dst.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}
