//! Launching the wrapped `claude` binary
//!
//! Two distinct modes with different process lifecycles: outside a git
//! repository the wrapper has nothing to sync and simply becomes claude
//! (process replacement); inside one it spawns claude as a child so
//! sync-out and retention can run after it exits.

use std::ffi::OsString;
use std::process::Command;

/// The wrapped binary could not be started.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The binary is not on `PATH`.
    #[error("{0} not found on PATH")]
    NotFound(String),

    /// Any other spawn failure.
    #[error("failed to run {0}: {1}")]
    Spawn(String, #[source] std::io::Error),
}

fn launch_error(claude_bin: &str, err: std::io::Error) -> LaunchError {
    if err.kind() == std::io::ErrorKind::NotFound {
        LaunchError::NotFound(claude_bin.to_string())
    } else {
        LaunchError::Spawn(claude_bin.to_string(), err)
    }
}

/// Replace the current process with the wrapped binary.
///
/// Pass-through mode for sessions outside a git work tree. Only ever
/// returns on failure.
#[cfg(unix)]
pub fn exec_passthrough(claude_bin: &str, args: &[OsString]) -> LaunchError {
    use std::os::unix::process::CommandExt;

    let err = Command::new(claude_bin).args(args).exec();
    launch_error(claude_bin, err)
}

/// Pass-through on platforms without `exec`: run as a child and exit
/// with its code.
#[cfg(not(unix))]
pub fn exec_passthrough(claude_bin: &str, args: &[OsString]) -> LaunchError {
    match run_session(claude_bin, args) {
        Ok(code) => std::process::exit(code),
        Err(err) => err,
    }
}

/// Run the wrapped binary as a child with inherited stdio and return its
/// exit code.
///
/// A session killed by a signal reports exit code 1.
///
/// # Errors
///
/// Returns [`LaunchError::NotFound`] when the binary is missing, or
/// [`LaunchError::Spawn`] for any other spawn failure.
pub fn run_session(claude_bin: &str, args: &[OsString]) -> Result<i32, LaunchError> {
    let status = Command::new(claude_bin)
        .args(args)
        .status()
        .map_err(|err| launch_error(claude_bin, err))?;

    Ok(status.code().unwrap_or(1))
}
