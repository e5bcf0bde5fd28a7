use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// Lock documents occasionally carry stray bytes in tarball URLs; those must not
/// stop the package keys from being read.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Atomically replace `path` with `bytes`.
///
/// Writes a sibling temp file, syncs it, then renames over the target. Readers
/// see either the previous contents or the new ones.
///
/// # Errors
/// Returns an error if the write or rename fails.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let temp_path = temp_sibling(path);

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        // Windows refuses to rename over an existing file.
        if cfg!(windows) {
            fs::copy(&temp_path, path)?;
            let _ = fs::remove_file(&temp_path);
            return Ok(());
        }
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("file");
    parent.join(format!(".{file_name}.tmp.{}", std::process::id()))
}

/// List the names of the direct children of `dir`, like a plain `ls`.
///
/// Hidden entries (leading `.`) are skipped. Names are returned sorted by byte
/// order; entries whose names are not valid UTF-8 are dropped.
///
/// # Errors
/// Returns an error if `dir` cannot be read.
pub fn list_entry_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name.to_string());
    }

    names.sort();
    Ok(names)
}
