//! `lockscope cherry-pick` command implementation.
//!
//! Prints matching `git log --oneline` entries, then their hashes
//! oldest-first on one line for `git cherry-pick`.

use super::fail;
use lockscope_core::vcs::{cherry_pick_order, filter_commits, parse_oneline, CommitLogSource, GitLog};
use lockscope_core::Config;
use miette::Result;
use tracing::debug;

/// Run the cherry-pick command.
pub fn run(config: &Config, pattern: &str, max_count: u32, json: bool) -> Result<()> {
    let log = match GitLog::new(&config.cwd).with_max_count(max_count).log() {
        Ok(log) => log,
        Err(e) => fail(&e, json),
    };

    let commits = parse_oneline(&log);
    let matched = filter_commits(&commits, pattern);
    debug!(scanned = commits.len(), matched = matched.len(), pattern, "filtered commits");

    let hashes = cherry_pick_order(&matched).join(" ");

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "commits": matched,
                "cherry_pick": hashes
            })
        );
        return Ok(());
    }

    for commit in &matched {
        println!("{}", commit.line());
    }
    if !hashes.is_empty() {
        println!("{hashes}");
    }

    Ok(())
}
