//! End-to-end tests driving the ccbranch binary against a scratch git
//! repository, a stub `claude` executable and an isolated `HOME`.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Harness {
    _tmp: TempDir,
    home: PathBuf,
    repo: PathBuf,
    bin: PathBuf,
}

impl Harness {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let repo = tmp.path().join("myrepo");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&repo).unwrap();
        fs::create_dir_all(&bin).unwrap();

        let harness = Self {
            _tmp: tmp,
            home,
            repo,
            bin,
        };
        harness.git(&["init", "-b", "main"]);
        harness.stub_claude("exit 0");
        harness
    }

    /// Install a stub claude script on the harness PATH.
    fn stub_claude(&self, body: &str) {
        let path = self.bin.join("claude");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn git(&self, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .env("HOME", &self.home)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    /// ccbranch command with isolated HOME, stub PATH and repo cwd.
    fn cmd(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.bin.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::cargo_bin("ccbranch").unwrap();
        cmd.current_dir(&self.repo)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("PATH", path);
        cmd
    }

    fn store_base(&self) -> PathBuf {
        self.home.join(".workspaces").join("myrepo")
    }

    fn exclude_file(&self) -> PathBuf {
        self.repo.join(".git/info/exclude")
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_passthrough_outside_git_repo() {
    let harness = Harness::new();
    harness.stub_claude("echo claude ran");

    let outside = harness.home.join("elsewhere");
    fs::create_dir_all(&outside).unwrap();

    harness
        .cmd()
        .current_dir(&outside)
        .assert()
        .success()
        .stdout(predicate::str::contains("claude ran"));
}

#[test]
fn test_forwards_claude_exit_code() {
    let harness = Harness::new();
    harness.stub_claude("exit 42");

    harness.cmd().assert().code(42);
}

#[test]
fn test_arguments_forwarded_verbatim() {
    let harness = Harness::new();
    harness.stub_claude(r#"echo "$@""#);

    harness
        .cmd()
        .args(["--model", "opus", "chat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--model opus chat"));
}

#[test]
fn test_sync_out_persists_personal_files() {
    let harness = Harness::new();
    fs::write(harness.repo.join("CLAUDE.local.md"), "personal notes").unwrap();
    fs::create_dir_all(harness.repo.join(".git/info")).unwrap();
    fs::write(harness.exclude_file(), "CLAUDE.local.md\n").unwrap();

    harness.cmd().assert().success();

    assert_eq!(
        read(&harness.store_base().join("CLAUDE.local.md")),
        "personal notes"
    );
}

#[test]
fn test_sync_in_materializes_storage_and_excludes() {
    let harness = Harness::new();
    fs::create_dir_all(harness.store_base()).unwrap();
    fs::write(
        harness.store_base().join("CLAUDE.local.md"),
        "default config",
    )
    .unwrap();

    harness.cmd().assert().success();

    assert_eq!(
        read(&harness.repo.join("CLAUDE.local.md")),
        "default config"
    );
    assert!(read(&harness.exclude_file()).contains("CLAUDE.local.md"));
}

#[test]
fn test_feature_branch_gets_isolated_storage() {
    let harness = Harness::new();
    fs::create_dir_all(harness.store_base()).unwrap();
    fs::write(harness.store_base().join("CLAUDE.md"), "default config").unwrap();
    harness.git(&["checkout", "-b", "feature/x"]);

    harness.cmd().assert().success();

    let branch_copy = harness
        .store_base()
        .join("branches")
        .join("feature%2Fx")
        .join("CLAUDE.md");
    assert_eq!(read(&branch_copy), "default config");
    assert_eq!(read(&harness.repo.join("CLAUDE.md")), "default config");
    // Default storage is untouched by the branch session
    assert_eq!(
        read(&harness.store_base().join("CLAUDE.md")),
        "default config"
    );
}

#[test]
fn test_nonzero_claude_exit_still_syncs_out() {
    let harness = Harness::new();
    harness.stub_claude("exit 3");
    fs::write(harness.repo.join("notes.md"), "wip").unwrap();
    fs::create_dir_all(harness.repo.join(".git/info")).unwrap();
    fs::write(harness.exclude_file(), "notes.md\n").unwrap();

    harness.cmd().assert().code(3);

    assert_eq!(read(&harness.store_base().join("notes.md")), "wip");
}

#[test]
fn test_detached_head_passes_through() {
    let harness = Harness::new();
    harness.stub_claude("echo passthrough mode");
    harness.git(&[
        "-c",
        "user.email=test@example.com",
        "-c",
        "user.name=test",
        "commit",
        "--allow-empty",
        "-m",
        "init",
    ]);
    harness.git(&["checkout", "--detach"]);

    harness
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("passthrough mode"));

    // No branch name, no storage
    assert!(!harness.store_base().exists());
}

#[test]
fn test_project_config_overrides_claude_binary() {
    let harness = Harness::new();
    let other = harness.bin.join("claude-next");
    fs::write(&other, "#!/bin/sh\necho next generation\n").unwrap();
    fs::set_permissions(&other, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(harness.repo.join(".ccbranch.yml"), "claude_bin: claude-next\n").unwrap();

    harness
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("next generation"));
}

#[test]
fn test_missing_claude_reports_error() {
    let harness = Harness::new();
    fs::remove_file(harness.bin.join("claude")).unwrap();
    // Point PATH at the stub dir only so the real claude cannot leak in
    let mut cmd = Command::cargo_bin("ccbranch").unwrap();
    cmd.current_dir(&harness.repo)
        .env("HOME", &harness.home)
        .env("XDG_CONFIG_HOME", harness.home.join(".config"))
        .env("PATH", harness.bin.display().to_string());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("claude not found"));
}
