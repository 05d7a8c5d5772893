//! Command-line argument capture
//!
//! ccbranch is transparent: every argument, including `--help` and
//! `--version`, belongs to claude and is forwarded untouched. The
//! wrapper itself takes no flags; its behavior is driven by config files
//! and the state of the surrounding git repository.

use std::ffi::OsString;

use clap::Parser;

/// Branch-aware personal file sync wrapper for the Claude Code CLI
#[derive(Parser, Debug)]
#[command(
    name = "ccbranch",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Arguments forwarded verbatim to claude
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let cli = Cli::try_parse_from(["ccbranch"]).unwrap();
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_captures_plain_args() {
        let cli = Cli::try_parse_from(["ccbranch", "chat", "hello"]).unwrap();
        assert_eq!(cli.args, vec!["chat", "hello"]);
    }

    #[test]
    fn test_captures_hyphenated_args() {
        // Even --help and --version belong to claude
        let cli =
            Cli::try_parse_from(["ccbranch", "--help", "--model", "opus", "--version"]).unwrap();
        assert_eq!(cli.args, vec!["--help", "--model", "opus", "--version"]);
    }
}
