//! Integration tests for `lockscope cherry-pick`.
//!
//! Each test builds a throwaway git repository. Tests return early when
//! `git` is not installed.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "lockscope-cli", "--bin", "lockscope", "--"]);
    cmd
}

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .is_ok_and(|o| o.status.success())
}

fn repo_with_commits(subjects: &[&str]) -> Option<TempDir> {
    let dir = tempfile::tempdir().unwrap();
    if !git(dir.path(), &["init", "-q"]) {
        return None;
    }
    for subject in subjects {
        if !git(dir.path(), &["commit", "-q", "--allow-empty", "-m", subject]) {
            return None;
        }
    }
    Some(dir)
}

fn head_hashes(dir: &Path) -> Vec<String> {
    let output = Command::new("git")
        .args(["log", "--format=%h"])
        .current_dir(dir)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn run_cherry_pick(dir: &Path, pattern: &str) -> Output {
    cargo_bin()
        .arg("--cwd")
        .arg(dir)
        .args(["cherry-pick", pattern])
        .output()
        .expect("Failed to run cherry-pick command")
}

#[test]
fn test_matches_oldest_first() {
    let Some(repo) = repo_with_commits(&[
        "PROJ-1 first change",
        "unrelated work",
        "PROJ-1 follow up",
    ]) else {
        return;
    };

    // Newest first: [follow up, unrelated, first].
    let hashes = head_hashes(repo.path());
    assert_eq!(hashes.len(), 3);

    let output = run_cherry_pick(repo.path(), "PROJ-1");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("PROJ-1 follow up"));
    assert!(lines[1].ends_with("PROJ-1 first change"));
    assert_eq!(lines[2], format!("{} {}", hashes[2], hashes[0]));
}

#[test]
fn test_no_match_prints_nothing() {
    let Some(repo) = repo_with_commits(&["initial commit"]) else {
        return;
    };

    let output = run_cherry_pick(repo.path(), "PROJ-404");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_output() {
    let Some(repo) = repo_with_commits(&["PROJ-7 fix", "other"]) else {
        return;
    };

    let output = cargo_bin()
        .arg("--json")
        .arg("--cwd")
        .arg(repo.path())
        .args(["cherry-pick", "PROJ-7"])
        .output()
        .expect("Failed to run cherry-pick command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

    assert_eq!(json["ok"], true);
    assert_eq!(json["commits"].as_array().unwrap().len(), 1);
    assert_eq!(json["commits"][0]["subject"], "PROJ-7 fix");
    assert_eq!(json["cherry_pick"], json["commits"][0]["hash"]);
}
