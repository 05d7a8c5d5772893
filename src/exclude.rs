//! Git exclude list bookkeeping
//!
//! Managed entries live in `.git/info/exclude` so personal files never
//! show up in `git status`. Only plain literal paths count as managed;
//! glob patterns in the file belong to the user and are left alone.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Location of the exclude file relative to the repository root.
pub const EXCLUDE_FILE: &str = ".git/info/exclude";

/// Read the managed entries from the exclude file.
///
/// Blank lines, `#` comments and glob patterns (any of `*?[]`) are
/// skipped, a single trailing `/` is stripped, and entries that do not
/// currently exist under `repo_root` are dropped. A missing exclude file
/// yields an empty list, not an error.
///
/// # Errors
///
/// Returns an error if the exclude file exists but cannot be read.
pub fn read_entries(repo_root: &Path) -> Result<Vec<String>> {
    let exclude_path = repo_root.join(EXCLUDE_FILE);

    let content = match fs::read_to_string(&exclude_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| {
                format!("Failed to read exclude file: {}", exclude_path.display())
            });
        }
    };

    let mut entries = Vec::new();
    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Glob patterns are not managed entries
        if line.contains(['*', '?', '[', ']']) {
            continue;
        }

        let entry = line.strip_suffix('/').unwrap_or(line);

        if repo_root.join(entry).exists() {
            entries.push(entry.to_string());
        }
    }

    Ok(entries)
}

/// Append `entry` to the exclude file unless an identical line is already
/// present. Creates `.git/info/` and the exclude file when absent.
///
/// # Errors
///
/// Returns an error if the exclude file cannot be read or written.
pub fn add_entry(repo_root: &Path, entry: &str) -> Result<()> {
    let exclude_path = repo_root.join(EXCLUDE_FILE);

    if let Some(parent) = exclude_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    match fs::read_to_string(&exclude_path) {
        Ok(content) => {
            if content.lines().any(|line| line.trim() == entry) {
                return Ok(());
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| {
                format!("Failed to read exclude file: {}", exclude_path.display())
            });
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&exclude_path)
        .with_context(|| format!("Failed to open exclude file: {}", exclude_path.display()))?;

    writeln!(file, "{entry}")
        .with_context(|| format!("Failed to write exclude file: {}", exclude_path.display()))?;

    Ok(())
}
