//! `lockscope packages` command implementation.

use super::fail;
use lockscope_core::pkg::{
    analyze, Analysis, AnalyzeOptions, DiskUsageSource, DuCommand, LockDocument, ParseOptions,
    SizeMap,
};
use lockscope_core::Config;
use miette::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Packages command action.
#[derive(Debug, Clone)]
pub struct PackagesAction {
    pub input: PathBuf,
    pub duplicates_only: bool,
    pub sizes: bool,
    pub sort_by_size: bool,
    pub reverse: bool,
    pub strip_peers: bool,
    pub store_dir: PathBuf,
}

/// Run the packages command.
///
/// Nothing reaches stdout unless the whole pipeline succeeds.
pub fn run(config: &Config, action: &PackagesAction, json: bool) -> Result<()> {
    let (doc, analysis) = match execute(config, action) {
        Ok(result) => result,
        Err(e) => fail(&e, json),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "lockfile_version": doc.lockfile_version,
                "count": analysis.len(),
                "packages": analysis.packages
            })
        );
    } else {
        print!("{}", analysis.render_text());
    }

    Ok(())
}

fn execute(
    config: &Config,
    action: &PackagesAction,
) -> lockscope_core::Result<(LockDocument, Analysis)> {
    let parse_options = ParseOptions {
        strip_peer_suffix: action.strip_peers,
    };

    let input = config.resolve(&action.input);
    let doc = LockDocument::read_from(&input, &parse_options)?;
    debug!(
        path = %input.display(),
        packages = doc.packages.len(),
        lockfile_version = doc.lockfile_version.as_deref().unwrap_or("unknown"),
        "parsed lock file"
    );

    let sizes = if action.sizes {
        debug!(store = %action.store_dir.display(), "running du over store");
        let report = DuCommand::new(&config.cwd).report(&action.store_dir)?;
        if let Some(warnings) = &report.warnings {
            for line in warnings.lines() {
                warn!(store = %action.store_dir.display(), "{line}");
            }
        }
        let sizes = SizeMap::from_report(&report.output, &action.store_dir);
        debug!(entries = sizes.len(), "collected store sizes");
        Some(sizes)
    } else {
        None
    };

    let options = AnalyzeOptions {
        duplicates_only: action.duplicates_only,
        sort_by_size: action.sort_by_size,
        reverse: action.reverse,
    };
    let analysis = analyze(&doc, sizes.as_ref(), &options)?;

    if analysis.with_sizes() {
        let missing = analysis.packages.iter().filter(|r| r.size.is_none()).count();
        if missing > 0 {
            debug!(missing, "packages without a store entry");
        }
    }

    Ok((doc, analysis))
}
