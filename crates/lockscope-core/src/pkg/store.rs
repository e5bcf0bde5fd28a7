//! Per-package sizes from the pnpm store.
//!
//! pnpm installs every resolved package under `node_modules/.pnpm/<dir>`,
//! where `<dir>` is the identifier with the scope slash escaped as `+`
//! (`@mui/base@5.0.0` lives in `@mui+base@5.0.0`). A depth-1 `du -h` over
//! the store therefore reports one size per installed package:
//!
//! ```text
//! 4.0M	node_modules/.pnpm/@mui+base@5.0.0
//! 120K	node_modules/.pnpm/react@18.2.0
//! 212M	node_modules/.pnpm
//! ```

use super::ident::{version_delimiter, PackageId};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Store root relative to the project directory.
pub const DEFAULT_STORE_DIR: &str = "node_modules/.pnpm";

/// Environment variable overriding the store root.
pub const STORE_DIR_ENV: &str = "LOCKSCOPE_STORE_DIR";

/// Output of one disk-usage run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuReport {
    /// One `size<whitespace>path` line per directory.
    pub output: String,
    /// Diagnostics printed alongside a usable report, e.g. unreadable entries.
    pub warnings: Option<String>,
}

impl DuReport {
    /// Interpret a finished `du` process.
    ///
    /// `du` exits non-zero when a single entry is unreadable but still prints
    /// every other size, so a failing status only counts as an error when
    /// stdout is empty.
    fn from_output(output: &Output) -> Result<Self> {
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() && stdout.trim().is_empty() {
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::command("du", message));
        }

        Ok(Self {
            output: stdout,
            warnings: Some(stderr).filter(|s| !s.is_empty()),
        })
    }
}

/// Source of a `du`-style report for the direct children of a store root.
pub trait DiskUsageSource {
    fn report(&self, store_dir: &Path) -> Result<DuReport>;
}

/// Runs `du -hd 1 <store_dir>` from a working directory.
#[derive(Debug, Clone)]
pub struct DuCommand {
    cwd: PathBuf,
}

impl DuCommand {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// `LC_ALL=C` keeps the decimal separator a `.` regardless of locale.
    fn command(&self, store_dir: &Path) -> Command {
        let mut cmd = Command::new("du");
        cmd.arg("-hd")
            .arg("1")
            .arg(store_dir)
            .env("LC_ALL", "C")
            .current_dir(&self.cwd);
        cmd
    }
}

impl DiskUsageSource for DuCommand {
    fn report(&self, store_dir: &Path) -> Result<DuReport> {
        let output = self
            .command(store_dir)
            .output()
            .map_err(|e| Error::command("du", format!("failed to spawn: {e}")))?;

        DuReport::from_output(&output)
    }
}

/// One matched report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuLine<'a> {
    /// Raw size token, e.g. `4.0M`.
    pub size: &'a str,
    /// Store directory name, still escaped.
    pub name: &'a str,
}

/// Match one report line against `size <ws> <prefix><name>`.
///
/// `prefix` is the store root followed by `/`. The size token is digits and
/// `.` with an optional trailing unit letter. Returns `None` for anything
/// else, including the store root's own total line.
#[must_use]
pub fn parse_du_line<'a>(line: &'a str, prefix: &str) -> Option<DuLine<'a>> {
    let rest = line.trim_start();

    let mut size_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    if size_len == 0 {
        return None;
    }
    if rest[size_len..].starts_with(|c: char| c.is_ascii_alphabetic()) {
        size_len += 1;
    }
    let (size, rest) = rest.split_at(size_len);
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let name = rest.trim_start().strip_prefix(prefix)?.trim_end();
    if name.is_empty() {
        return None;
    }

    Some(DuLine { size, name })
}

/// Turn a store directory name back into a package identifier.
///
/// `+` is the store's escape for the scope slash. With `strip_peers`, the
/// `_peer@version` suffix pnpm appends after the version is dropped as well.
#[must_use]
pub fn decode_store_name(name: &str, strip_peers: bool) -> PackageId {
    let decoded = name.replace('+', "/");
    if !strip_peers {
        return PackageId::new(decoded);
    }

    let cut = version_delimiter(&decoded)
        .and_then(|at| decoded[at..].find('_').map(|pos| at + pos));
    match cut {
        Some(pos) => PackageId::new(&decoded[..pos]),
        None => PackageId::new(decoded),
    }
}

/// Size token per installed package.
///
/// Every directory is indexed twice: by its full decoded name, peer suffixes
/// included, and by the name with peers stripped. Lookups try the exact
/// peer variant first, so lock identifiers match whether or not their
/// `(peer)` qualifiers were kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeMap {
    exact: BTreeMap<PackageId, String>,
    stripped: BTreeMap<PackageId, String>,
}

impl SizeMap {
    /// Parse a report. Lines outside `store_dir` are skipped; when two
    /// directories decode to the same key the later line wins.
    #[must_use]
    pub fn from_report(report: &str, store_dir: &Path) -> Self {
        let root = store_dir.to_string_lossy();
        let prefix = format!("{}/", root.trim_end_matches('/'));

        let mut map = Self::default();
        for line in report.lines().filter_map(|line| parse_du_line(line, &prefix)) {
            map.insert(
                decode_store_name(line.name, false),
                decode_store_name(line.name, true),
                line.size,
            );
        }
        map
    }

    fn insert(&mut self, exact: PackageId, stripped: PackageId, size: &str) {
        self.exact.insert(exact, size.to_string());
        self.stripped.insert(stripped, size.to_string());
    }

    /// Size for a lock identifier, with or without its peer qualifier.
    #[must_use]
    pub fn get(&self, id: &PackageId) -> Option<&str> {
        self.exact
            .get(&id.store_key())
            .or_else(|| self.stripped.get(&id.without_peers()))
            .map(String::as_str)
    }

    /// Number of store directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Entries keyed by decoded directory name.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageId, &str)> {
        self.exact.iter().map(|(id, size)| (id, size.as_str()))
    }
}

impl FromIterator<(PackageId, String)> for SizeMap {
    fn from_iter<I: IntoIterator<Item = (PackageId, String)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (id, size) in iter {
            map.insert(id.store_key(), id.without_peers(), &size);
        }
        map
    }
}
