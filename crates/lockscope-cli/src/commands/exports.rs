//! `lockscope exports` command implementation.

use super::fail;
use lockscope_core::exports::{render_index, scan_dir, write_index};
use lockscope_core::Config;
use miette::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Exports command action.
#[derive(Debug, Clone)]
pub struct ExportsAction {
    pub dir: PathBuf,
    pub only_components: bool,
    pub dry_run: bool,
}

/// Run the exports command.
pub fn run(config: &Config, action: &ExportsAction, json: bool) -> Result<()> {
    let dir = config.resolve(&action.dir);

    let entries = match scan_dir(&dir, action.only_components) {
        Ok(entries) => entries,
        Err(e) => fail(&e, json),
    };
    debug!(dir = %dir.display(), modules = entries.len(), "scanned directory");

    let content = render_index(&entries);

    let written = if action.dry_run {
        None
    } else {
        match write_index(&dir, &content) {
            Ok(path) => {
                info!(path = %path.display(), modules = entries.len(), "wrote re-exports");
                Some(path)
            }
            Err(e) => fail(&e, json),
        }
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "path": written.as_ref().map(|p| p.to_string_lossy()),
                "exports": entries,
                "content": content
            })
        );
    } else if let Some(path) = written {
        println!("Wrote {} export(s) to {}", entries.len(), path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
