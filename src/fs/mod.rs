//! Filesystem helpers for the networkd config sync.

pub mod atomic;

pub use atomic::atomic_write;

use crate::error::{Result, SetupError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Mode for directories created under `/etc/systemd`.
pub const DIR_MODE: u32 = 0o755;

/// Create `dir` (and its parents) if missing. An existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder
        .create(dir)
        .map_err(|e| SetupError::io("create directory", dir, e))
}

/// Byte-for-byte comparison of two files.
///
/// A missing `dst` compares as different; a missing `src` is an error.
pub fn files_match(src: &Path, dst: &Path) -> Result<bool> {
    let expected = fs::read(src).map_err(|e| SetupError::io("read", src, e))?;

    match fs::read(dst) {
        Ok(actual) => Ok(actual == expected),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SetupError::io("read", dst, e)),
    }
}

/// Copy `src` over `dst` unless the contents already match.
///
/// Returns true if `dst` was written.
pub fn sync_file(src: &Path, dst: &Path) -> Result<bool> {
    if files_match(src, dst)? {
        return Ok(false);
    }

    let content = fs::read(src).map_err(|e| SetupError::io("read", src, e))?;
    atomic_write(dst, &content)?;
    Ok(true)
}

/// Last modification time of `path`.
pub fn modified_at(path: &Path) -> Result<DateTime<Utc>> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| SetupError::io("stat", path, e))?;
    Ok(DateTime::<Utc>::from(modified))
}
