//! Error types for installer detection.
//!
//! This module defines [`DetectError`], the error type returned when the
//! environment cannot be inspected, and a [`Result`] type alias for convenience.
//!
//! A package that is not installed is not an error: [`crate::detect`] reports it
//! as `Ok(None)`. Likewise an environment that matches no known installer yields
//! a successful [`crate::InstallerKind::Unknown`] result.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for detection operations.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Reading package metadata or a marker file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path of the running executable could not be resolved.
    #[error("Cannot resolve the current executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DetectError {
    /// Attach the path that was being read to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DetectError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, DetectError>;
