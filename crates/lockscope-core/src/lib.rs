#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod exports;
pub mod pkg;
pub mod vcs;
pub mod version;

pub use config::Config;
pub use error::{Error, Result};
pub use pkg::{
    analyze, find_duplicates, Analysis, AnalysisRow, AnalyzeOptions, DiskUsageSource, DuCommand,
    DuReport, LockDocument, PackageId, ParseOptions, SizeMap, SizeToken, SizeUnit, SortedPackages,
};
pub use vcs::{cherry_pick_order, filter_commits, parse_oneline, Commit, CommitLogSource, GitLog};
pub use version::VERSION;
