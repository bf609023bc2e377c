//! Installed-package metadata.
//!
//! The detector only needs two things from a package registry: find the
//! metadata of an installed package by name, and read one named text file from
//! it. [`PackageRegistry`] and [`Distribution`] capture exactly that, so the
//! on-disk [`SitePackages`] registry can be swapped for an [`InMemoryRegistry`]
//! in tests or by embedding callers.

pub mod memory;
pub mod site_packages;

pub use memory::{InMemoryDistribution, InMemoryRegistry};
pub use site_packages::{DistInfo, SitePackages};

use crate::error::Result;

/// Metadata file recording which tool installed a package.
pub const INSTALLER_FILE: &str = "INSTALLER";

/// Metadata of one installed package.
pub trait Distribution {
    /// Read a named metadata file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    fn read_text(&self, name: &str) -> Result<Option<String>>;
}

/// Lookup of installed packages by name.
pub trait PackageRegistry {
    /// Find the metadata of an installed package.
    ///
    /// Returns `Ok(None)` when no such package is installed.
    fn distribution(&self, name: &str) -> Result<Option<Box<dyn Distribution>>>;
}

/// Read a metadata value, trimmed and lowercased.
///
/// A missing file and a file that is blank after trimming both give `None`.
pub fn read_metadata_value(dist: &dyn Distribution, key: &str) -> Result<Option<String>> {
    let value = dist
        .read_text(key)?
        .map(|text| text.trim().to_lowercase())
        .filter(|text| !text.is_empty());
    tracing::trace!("Metadata {} = {:?}", key, value);
    Ok(value)
}

/// Normalize a distribution name so that equivalent spellings compare equal.
///
/// Names are case-insensitive and treat runs of `-`, `_` and `.` as a single
/// `-`, so `Foo.Bar`, `foo_bar` and `foo--bar` all become `foo-bar`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}
