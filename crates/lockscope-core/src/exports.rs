//! Re-export (`index.ts`) generation.
//!
//! Every entry of a directory becomes one module name (the file name up to
//! its first `.`). Component modules, detected by a PascalCase name, also get
//! their default export re-exported under that name:
//!
//! ```text
//! export {default as Button} from './Button';
//! export * from './Button';
//! export * from './hooks'
//! ```

use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File the generated re-exports are written to.
pub const INDEX_FILE: &str = "index.ts";

/// Module name of the index file itself; never re-exported.
const INDEX_MODULE: &str = "index";

/// One module to re-export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub name: String,
    pub component: bool,
}

impl ExportEntry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let component = is_component_name(&name);
        Self { name, component }
    }

    fn render(&self) -> String {
        let name = &self.name;
        if self.component {
            format!("export {{default as {name}}} from './{name}';\nexport * from './{name}';")
        } else {
            format!("export * from './{name}'")
        }
    }
}

/// PascalCase: one or more words, each an ASCII uppercase letter followed by
/// at least one ASCII lowercase letter.
#[must_use]
pub fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars().peekable();
    if chars.peek().is_none() {
        return false;
    }

    while let Some(first) = chars.next() {
        if !first.is_ascii_uppercase() {
            return false;
        }
        let mut lower = 0;
        while chars.peek().is_some_and(char::is_ascii_lowercase) {
            chars.next();
            lower += 1;
        }
        if lower == 0 {
            return false;
        }
    }

    true
}

/// Module name for a directory entry: everything before the first `.`.
#[must_use]
pub fn module_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or_default()
}

/// Build the sorted, deduplicated export list from directory entry names.
#[must_use]
pub fn collect_entries<S: AsRef<str>>(file_names: &[S], only_components: bool) -> Vec<ExportEntry> {
    let names: BTreeSet<&str> = file_names
        .iter()
        .map(|n| module_name(n.as_ref()))
        .filter(|n| !n.is_empty() && *n != INDEX_MODULE)
        .collect();

    let mut entries: Vec<ExportEntry> = names
        .into_iter()
        .map(ExportEntry::new)
        .filter(|e| !only_components || e.component)
        .collect();

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Render the `index.ts` body.
#[must_use]
pub fn render_index(entries: &[ExportEntry]) -> String {
    entries
        .iter()
        .map(ExportEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// List `dir` and build its export entries.
pub fn scan_dir(dir: &Path, only_components: bool) -> Result<Vec<ExportEntry>> {
    let names = lockscope_util::fs::list_entry_names(dir)?;
    Ok(collect_entries(names.as_slice(), only_components))
}

/// Atomically write `content` to `<dir>/index.ts`, returning the path.
pub fn write_index(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join(INDEX_FILE);
    lockscope_util::fs::atomic_write(&path, content.as_bytes())?;
    Ok(path)
}
