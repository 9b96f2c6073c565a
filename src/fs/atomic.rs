//! Atomic file replacement.
//!
//! networkd may read its configuration directory at any moment, so files in
//! it are never written in place:
//! 1. Write content to `.{filename}.tmp` in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! Source and destination must be on the same filesystem for the rename to
//! be atomic, which holds because the temp file lives next to the target.
//! On crash a `.{filename}.tmp` file may remain; networkd ignores it.
//!
//! A symlinked target is resolved first, so the link survives and the file
//! it points to is replaced. An existing target's permission bits carry
//! over to the new file.

use crate::error::{Result, SetupError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, replacing it if it exists.
///
/// The parent directory must already exist.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = resolve_target(path.as_ref())?;
    let permissions = fs::metadata(&path).ok().map(|m| m.permissions());

    let temp_path = generate_temp_path(&path)?;
    write_and_sync(&temp_path, content, permissions)?;
    atomic_replace(&temp_path, &path)?;

    Ok(())
}

/// Follow a symlinked target to the file it points at.
///
/// A dangling link is an error.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| SetupError::io("resolve symlink", path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SetupError::IoError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
fn write_and_sync(
    path: &Path,
    content: &[u8],
    permissions: Option<fs::Permissions>,
) -> Result<()> {
    let mut file = File::create(path).map_err(|e| SetupError::io("create", path, e))?;

    permissions
        .map_or(Ok(()), |p| file.set_permissions(p))
        .and_then(|_| file.write_all(content))
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            SetupError::io("write", path, e)
        })
}

#[cfg(unix)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SetupError::io("replace", target, e)
    })?;

    // Persist the directory entry as well.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(not(unix))]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_file(target).map_err(|e| SetupError::io("replace", target, e))?;
    }
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SetupError::io("replace", target, e)
    })
}
