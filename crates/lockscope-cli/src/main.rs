#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

mod commands;
mod logging;

use clap::Parser;
use lockscope_core::pkg::{DEFAULT_LOCKFILE, DEFAULT_STORE_DIR, STORE_DIR_ENV};
use lockscope_core::vcs::DEFAULT_MAX_COUNT;
use lockscope_core::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lockscope")]
#[command(author, version, about = "pnpm lockfile analyzer and small repository helpers", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// List the packages recorded in a pnpm lock file
    Packages {
        /// Path to a pnpm-lock.yaml
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_LOCKFILE)]
        input: PathBuf,

        /// Show only packages installed in more than one version
        #[arg(short, long)]
        duplicated: bool,

        /// Show the on-disk size of each package from the store
        #[arg(short, long)]
        size: bool,

        /// Order by size instead of by name (smallest first)
        #[arg(long)]
        sort_size: bool,

        /// Reverse the output order
        #[arg(short, long)]
        reverse: bool,

        /// Drop peer-dependency qualifiers from package identifiers
        #[arg(long)]
        strip_peers: bool,

        /// Store root passed to `du`
        #[arg(long, value_name = "DIR", env = STORE_DIR_ENV, default_value = DEFAULT_STORE_DIR)]
        store_dir: PathBuf,
    },

    /// List recent commits mentioning a pattern, oldest-first hashes for cherry-pick
    CherryPick {
        /// Substring to look for in each `hash subject` log line
        pattern: String,

        /// Number of log entries to scan
        #[arg(long, default_value_t = DEFAULT_MAX_COUNT)]
        max_count: u32,
    },

    /// Generate an index.ts re-exporting every module in a directory
    Exports {
        /// Directory to scan and write index.ts into
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Export only components (PascalCase file names)
        #[arg(short = 'c', long)]
        only_component: bool,

        /// Print the generated file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Packages {
            input,
            duplicated,
            size,
            sort_size,
            reverse,
            strip_peers,
            store_dir,
        }) => {
            let span = tracing::info_span!("packages", cmd = "packages", cwd = %config.cwd.display());
            let _guard = span.enter();
            let action = commands::packages::PackagesAction {
                input,
                duplicates_only: duplicated,
                sizes: size,
                sort_by_size: sort_size,
                reverse,
                strip_peers,
                store_dir,
            };
            commands::packages::run(&config, &action, cli.json)
        }
        Some(Commands::CherryPick { pattern, max_count }) => {
            let span =
                tracing::info_span!("cherry-pick", cmd = "cherry-pick", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::cherry_pick::run(&config, &pattern, max_count, cli.json)
        }
        Some(Commands::Exports {
            dir,
            only_component,
            dry_run,
        }) => {
            let span = tracing::info_span!("exports", cmd = "exports", cwd = %config.cwd.display());
            let _guard = span.enter();
            let action = commands::exports::ExportsAction {
                dir,
                only_components: only_component,
                dry_run,
            };
            commands::exports::run(&config, &action, cli.json)
        }
    }
}
