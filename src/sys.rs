//! Filesystem existence checks that surface real I/O failures.
//!
//! `Path::exists` and `Path::is_dir` turn every error into `false`. These
//! helpers only treat "nothing there" as absent: a missing entry, or a path
//! that runs through a regular file. Anything else (permissions, symlink
//! loops) is returned as [`DetectError::Io`].

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use crate::error::{DetectError, Result};

/// Whether an error means the path simply does not exist.
pub fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Stat a path, following symlinks. Returns `Ok(None)` when it is missing.
pub fn metadata(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(DetectError::io(path, e)),
    }
}

/// Check whether a path exists.
pub fn path_exists(path: &Path) -> Result<bool> {
    Ok(metadata(path)?.is_some())
}

/// Check whether a path is an existing directory.
pub fn dir_exists(path: &Path) -> Result<bool> {
    Ok(metadata(path)?.is_some_and(|meta| meta.is_dir()))
}
