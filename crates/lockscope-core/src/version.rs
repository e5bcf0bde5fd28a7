/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns a formatted version string including build metadata if available.
#[must_use]
pub fn version_string() -> String {
    match option_env!("LOCKSCOPE_BUILD_GIT_HASH") {
        Some(hash) => format!("lockscope {VERSION} ({hash})"),
        None => format!("lockscope {VERSION}"),
    }
}
