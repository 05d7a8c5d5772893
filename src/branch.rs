//! Branch name to storage directory segment mapping
//!
//! Branch names may contain `/`, which would create unintended nested
//! directories under `branches/`. Both `%` and `/` are percent-encoded:
//! `%` first, so the subsequent `/` encoding cannot itself be re-encoded.

/// Encode a branch name into a single safe path segment.
#[must_use]
pub fn sanitize_branch_name(branch: &str) -> String {
    branch.replace('%', "%25").replace('/', "%2F")
}

/// Decode a storage directory segment back into a branch name.
///
/// Exact inverse of [`sanitize_branch_name`]: `%2F` is decoded before
/// `%25`.
#[must_use]
pub fn unsanitize_branch_name(name: &str) -> String {
    name.replace("%2F", "/").replace("%25", "%")
}
