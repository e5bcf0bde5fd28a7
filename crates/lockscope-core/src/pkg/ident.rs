//! Package identifiers.
//!
//! An identifier is the composite key pnpm uses for one installed package
//! instance:
//! - `react@18.2.0`
//! - `@types/node@20.11.5`
//! - `react-dom@18.2.0(react@18.2.0)` (peer qualifier)

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A package identifier: optional `@scope/`, name, `@version`, optional peer qualifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Wrap an already-normalized identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize a raw `packages` key from a lock document.
    ///
    /// The single leading `/` older lockfile versions put on every key is
    /// dropped. With `strip_peers`, the `(peer@version)` qualifier is dropped too.
    #[must_use]
    pub fn from_lock_key(key: &str, strip_peers: bool) -> Self {
        let key = key.strip_prefix('/').unwrap_or(key);
        let key = if strip_peers {
            strip_peer_qualifier(key)
        } else {
            key
        };
        Self(key.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name part used to detect multiple installed versions.
    ///
    /// Splits on `@`. Scoped identifiers start with `@`, so their name is the
    /// second segment (`@scope/foo@1.0.0` → `scope/foo`); everything else takes
    /// the first segment (`foo@1.0.0` → `foo`).
    #[must_use]
    pub fn base_name(&self) -> &str {
        let mut segments = self.0.split('@');
        let name = if self.0.starts_with('@') {
            segments.nth(1)
        } else {
            segments.next()
        };
        name.unwrap_or_default()
    }

    /// The identifier with any `(peer@version)` qualifier removed.
    #[must_use]
    pub fn without_peers(&self) -> Self {
        Self(strip_peer_qualifier(&self.0).to_string())
    }

    /// The identifier as it appears in a decoded store directory name.
    ///
    /// pnpm writes each `(peer@version)` qualifier as a `_peer@version`
    /// suffix: `a@1.0.0(b@2.0.0)(c@3.0.0)` → `a@1.0.0_b@2.0.0_c@3.0.0`.
    #[must_use]
    pub fn store_key(&self) -> Self {
        Self(self.0.replace('(', "_").replace(')', ""))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Byte offset of the `@` separating name and version, if any.
pub(crate) fn version_delimiter(id: &str) -> Option<usize> {
    if let Some(rest) = id.strip_prefix('@') {
        rest.find('@').map(|pos| pos + 1)
    } else {
        id.find('@')
    }
}

/// Drop a trailing `(peer@version)...` qualifier.
pub(crate) fn strip_peer_qualifier(id: &str) -> &str {
    match id.find('(') {
        Some(pos) => &id[..pos],
        None => id,
    }
}

/// Identifiers in ascending byte order with no repeats.
///
/// Same-name packages sort next to each other, which the duplicate scan
/// relies on. The only constructor is `FromIterator`, which sorts and dedups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortedPackages(Vec<PackageId>);

impl SortedPackages {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageId> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PackageId] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, id: &PackageId) -> bool {
        self.0.binary_search(id).is_ok()
    }
}

impl FromIterator<PackageId> for SortedPackages {
    fn from_iter<I: IntoIterator<Item = PackageId>>(iter: I) -> Self {
        let set: BTreeSet<PackageId> = iter.into_iter().collect();
        Self(set.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SortedPackages {
    type Item = &'a PackageId;
    type IntoIter = std::slice::Iter<'a, PackageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SortedPackages {
    type Item = PackageId;
    type IntoIter = std::vec::IntoIter<PackageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
