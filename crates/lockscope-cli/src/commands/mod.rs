pub mod cherry_pick;
pub mod exports;
pub mod packages;
pub mod version;

/// Report a core error and exit with status 1.
///
/// Human mode writes `error: ...` to stderr and nothing to stdout. JSON mode
/// writes a single `{"ok": false, "error": {...}}` object to stdout.
pub fn fail(err: &lockscope_core::Error, json: bool) -> ! {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": false,
                "error": {
                    "code": err.code(),
                    "message": err.to_string()
                }
            })
        );
    } else {
        eprintln!("error: {err}");
    }
    std::process::exit(1);
}
