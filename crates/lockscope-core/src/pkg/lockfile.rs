//! pnpm lock document reader.
//!
//! Only two top-level fields matter here:
//!
//! ```yaml
//! lockfileVersion: '6.0'
//! packages:
//!   /@mui/base@5.0.0-beta.4(react@18.2.0):
//!     resolution: {integrity: sha512-...}
//!   /react@18.2.0:
//!     resolution: {integrity: sha512-...}
//! ```
//!
//! Everything under each `packages` entry is ignored; only the keys are read.

use super::ident::{PackageId, SortedPackages};
use crate::error::{Error, Result};
use serde_yaml::Value;
use std::path::Path;

/// Conventional lock file name, looked up in the working directory.
pub const DEFAULT_LOCKFILE: &str = "pnpm-lock.yaml";

/// Options controlling key normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop the `(peer@version)` qualifier from every key.
    pub strip_peer_suffix: bool,
}

/// The parts of a lock document the analyzer uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockDocument {
    /// `lockfileVersion`, when the document declares one.
    pub lockfile_version: Option<String>,
    /// Normalized package identifiers in ascending byte order.
    pub packages: SortedPackages,
}

impl LockDocument {
    /// Read and parse the lock document at `path`.
    pub fn read_from(path: &Path, options: &ParseOptions) -> Result<Self> {
        let text = lockscope_util::fs::read_to_string_lossy(path).map_err(|source| {
            Error::LockRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&text, path, options)
    }

    /// Parse lock document text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path, options: &ParseOptions) -> Result<Self> {
        let format_error = |reason: String| Error::LockFormat {
            path: origin.to_path_buf(),
            reason: Some(reason),
        };

        let doc: Value = serde_yaml::from_str(text).map_err(|e| format_error(e.to_string()))?;

        let Some(Value::Mapping(packages)) = doc.get("packages") else {
            return Err(format_error("missing `packages` mapping".to_string()));
        };

        let packages: SortedPackages = packages
            .keys()
            .filter_map(Value::as_str)
            .map(|key| PackageId::from_lock_key(key, options.strip_peer_suffix))
            .collect();

        let lockfile_version = match doc.get("lockfileVersion") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Ok(Self {
            lockfile_version,
            packages,
        })
    }
}
