//! pnpm lock document analysis.
//!
//! Provides utilities for:
//! - Reading package identifiers out of `pnpm-lock.yaml`
//! - Finding packages installed in more than one version
//! - Joining per-package store sizes reported by `du`
//! - Ordering and rendering the combined result

pub mod duplicates;
pub mod ident;
pub mod lockfile;
pub mod report;
pub mod size;
pub mod store;

pub use duplicates::find_duplicates;
pub use ident::{PackageId, SortedPackages};
pub use lockfile::{LockDocument, ParseOptions, DEFAULT_LOCKFILE};
pub use report::{analyze, Analysis, AnalysisRow, AnalyzeOptions};
pub use size::{SizeToken, SizeUnit};
pub use store::{
    decode_store_name, parse_du_line, DiskUsageSource, DuCommand, DuLine, DuReport, SizeMap,
    DEFAULT_STORE_DIR, STORE_DIR_ENV,
};
