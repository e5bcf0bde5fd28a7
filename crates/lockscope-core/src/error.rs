use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes surfaced in `--json` output.
pub mod codes {
    /// Lock document not found at the given path.
    pub const LOCK_NOT_FOUND: &str = "LOCK_NOT_FOUND";
    /// Lock document exists but could not be read.
    pub const LOCK_READ_FAILED: &str = "LOCK_READ_FAILED";
    /// Lock document has no `packages` mapping (or is not YAML at all).
    pub const LOCK_FORMAT_INVALID: &str = "LOCK_FORMAT_INVALID";
    /// A disk-usage size token could not be parsed.
    pub const SIZE_TOKEN_INVALID: &str = "SIZE_TOKEN_INVALID";
    /// `du`/`git` could not be spawned or exited unsuccessfully.
    pub const EXTERNAL_COMMAND_FAILED: &str = "EXTERNAL_COMMAND_FAILED";
    /// Any other I/O failure.
    pub const IO_ERROR: &str = "IO_ERROR";
}

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lockscope operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read lock file at {path}: {source}")]
    LockRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a pnpm lock file{}", fmt_reason(.reason))]
    LockFormat {
        path: PathBuf,
        reason: Option<String>,
    },

    #[error("Invalid size token '{token}'")]
    SizeParse { token: String },

    #[error("`{program}` failed: {message}")]
    Command { program: String, message: String },
}

impl Error {
    /// Get the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => codes::IO_ERROR,
            Self::LockRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                codes::LOCK_NOT_FOUND
            }
            Self::LockRead { .. } => codes::LOCK_READ_FAILED,
            Self::LockFormat { .. } => codes::LOCK_FORMAT_INVALID,
            Self::SizeParse { .. } => codes::SIZE_TOKEN_INVALID,
            Self::Command { .. } => codes::EXTERNAL_COMMAND_FAILED,
        }
    }

    #[must_use]
    pub fn command(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            program: program.into(),
            message: message.into(),
        }
    }
}

fn fmt_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}
