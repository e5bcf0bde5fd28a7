//! Commit filtering for cherry-picks.
//!
//! Reads recent `git log --oneline` entries, keeps the ones mentioning a
//! pattern (typically a ticket id), and lists their hashes oldest-first so
//! they can be handed to `git cherry-pick` in order.

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// How many log entries are scanned by default.
pub const DEFAULT_MAX_COUNT: u32 = 100;

/// One `hash subject` log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
}

impl Commit {
    /// The entry as `git log --oneline` printed it.
    #[must_use]
    pub fn line(&self) -> String {
        if self.subject.is_empty() {
            self.hash.clone()
        } else {
            format!("{} {}", self.hash, self.subject)
        }
    }
}

/// Source of newline-separated `hash subject` entries, newest first.
pub trait CommitLogSource {
    fn log(&self) -> Result<String>;
}

/// Runs `git --no-pager log --oneline --max-count <n>`.
#[derive(Debug, Clone)]
pub struct GitLog {
    cwd: PathBuf,
    max_count: u32,
}

impl GitLog {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    #[must_use]
    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }
}

impl CommitLogSource for GitLog {
    fn log(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["--no-pager", "log", "--oneline", "--max-count"])
            .arg(self.max_count.to_string())
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| Error::command("git", format!("failed to spawn: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::command("git", stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split each non-empty line at its first space into hash and subject.
#[must_use]
pub fn parse_oneline(output: &str) -> Vec<Commit> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (hash, subject) = line.split_once(' ').unwrap_or((line, ""));
            Commit {
                hash: hash.to_string(),
                subject: subject.to_string(),
            }
        })
        .collect()
}

/// Keep entries whose full line contains `pattern`, preserving log order.
#[must_use]
pub fn filter_commits(commits: &[Commit], pattern: &str) -> Vec<Commit> {
    commits
        .iter()
        .filter(|c| c.line().contains(pattern))
        .cloned()
        .collect()
}

/// Hashes oldest-first, ready for `git cherry-pick`.
#[must_use]
pub fn cherry_pick_order(commits: &[Commit]) -> Vec<&str> {
    commits.iter().rev().map(|c| c.hash.as_str()).collect()
}
