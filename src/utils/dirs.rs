//! Filesystem helpers for output folder management.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find the first unused sibling of `base` by appending an increasing numeric
/// suffix (`base`, `base2`, `base3`, ...) and create it, missing parents
/// included. Returns the chosen path.
///
/// Two concurrent callers against the same base can observe the same unused
/// candidate; selection is not coordinated.
pub fn allocate_numbered_dir(base: &Path) -> io::Result<PathBuf> {
    let name = base
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "base path has no file name"))?;

    let mut candidate = base.to_path_buf();
    let mut index = 2;
    while candidate.exists() {
        candidate = base.with_file_name(format!("{}{}", name, index));
        index += 1;
    }
    fs::create_dir_all(&candidate)?;
    tracing::info!("created output folder {}", candidate.display());
    Ok(candidate)
}

/// Idempotently create (and return) the subdirectory `name` of `dir`.
pub fn ensure_subdir(dir: &Path, name: &str) -> io::Result<PathBuf> {
    let sub = dir.join(name);
    if !sub.exists() {
        fs::create_dir_all(&sub)?;
    }
    Ok(sub)
}
