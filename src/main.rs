use std::process;

use anyhow::Context;
use clap::Parser;

use ccbranch::cli::Cli;
use ccbranch::config::Config;
use ccbranch::error::Result;
use ccbranch::git::{self, GitBranches};
use ccbranch::launcher;
use ccbranch::retention;
use ccbranch::session::Session;
use ccbranch::sync;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(1);
        }
    }
}

/// Run one wrapped claude session and return the exit code to report.
fn run(cli: &Cli) -> Result<i32> {
    // Outside a git work tree there is nothing to sync: become claude
    let Ok(repo_root) = git::repo_root() else {
        return passthrough(cli);
    };

    let config = Config::load(Some(&repo_root))?;

    // Same for a detached HEAD: no branch name, no storage to key on
    let Ok(session) = Session::load(repo_root, &config) else {
        return passthrough(cli);
    };

    sync::sync_in(&session).context("sync in failed")?;

    let claude_exit = launcher::run_session(config.claude_bin(), &cli.args)?;

    // Always capture edits, even when claude exited non-zero
    sync::sync_out(&session).context("sync out failed")?;

    if let Err(err) =
        retention::cleanup_deleted_branches(&session, &GitBranches, config.grace_period())
    {
        eprintln!("warning: cleanup failed: {err:#}");
    }

    Ok(claude_exit)
}

fn passthrough(cli: &Cli) -> Result<i32> {
    let config = Config::load(None)?;
    Err(launcher::exec_passthrough(config.claude_bin(), &cli.args).into())
}
