//! On-disk package registry backed by `site-packages` directories.
//!
//! Installed packages are recorded as `<name>-<version>.dist-info` directories
//! (or legacy `<name>.egg-info` / `<name>-<version>.egg-info` directories)
//! holding plain-text metadata files such as `INSTALLER`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{normalize_name, Distribution, PackageRegistry};
use crate::error::{DetectError, Result};
use crate::sys;

const METADATA_DIR_SUFFIXES: &[&str] = &[".dist-info", ".egg-info"];

/// A package metadata directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistInfo {
    path: PathBuf,
}

impl DistInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The metadata directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Distribution for DistInfo {
    fn read_text(&self, name: &str) -> Result<Option<String>> {
        let file = self.path.join(name);
        match fs::read_to_string(&file) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DetectError::io(file, e)),
        }
    }
}

/// The package directories of one environment, searched in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePackages {
    dirs: Vec<PathBuf>,
}

impl SitePackages {
    /// Search the given directories, in order.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Find the package directories of the environment rooted at `prefix`.
    ///
    /// Looks for `lib/python*/site-packages` (POSIX layout) and
    /// `Lib/site-packages` (Windows layout).
    pub fn discover(prefix: &Path) -> Result<Self> {
        let mut dirs = Vec::new();

        let lib = prefix.join("lib");
        if let Some(entries) = read_dir_sorted(&lib)? {
            for entry in entries {
                let is_python = entry
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("python"));
                if !is_python {
                    continue;
                }
                let site_packages = entry.join("site-packages");
                if sys::dir_exists(&site_packages)? {
                    dirs.push(site_packages);
                }
            }
        }

        let windows_site_packages = prefix.join("Lib").join("site-packages");
        if !dirs.contains(&windows_site_packages) && sys::dir_exists(&windows_site_packages)? {
            dirs.push(windows_site_packages);
        }

        tracing::debug!("Package directories under {}: {:?}", prefix.display(), dirs);
        Ok(Self { dirs })
    }

    /// The directories searched, in order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find the metadata directory of an installed package.
    pub fn find(&self, name: &str) -> Result<Option<DistInfo>> {
        let wanted = normalize_name(name);

        for dir in &self.dirs {
            let Some(entries) = read_dir_sorted(dir)? else {
                continue;
            };
            for entry in entries {
                let matches = dist_name(&entry).is_some_and(|n| normalize_name(n) == wanted);
                if matches && sys::dir_exists(&entry)? {
                    tracing::trace!("Found {} at {}", name, entry.display());
                    return Ok(Some(DistInfo::new(entry)));
                }
            }
        }

        Ok(None)
    }
}

impl PackageRegistry for SitePackages {
    fn distribution(&self, name: &str) -> Result<Option<Box<dyn Distribution>>> {
        Ok(self
            .find(name)?
            .map(|dist| Box::new(dist) as Box<dyn Distribution>))
    }
}

/// Get the distribution name encoded in a metadata directory name.
fn dist_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let stem = METADATA_DIR_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))?;
    Some(stem.split('-').next().unwrap_or(stem))
}

/// List a directory's entries sorted by path.
///
/// Returns `Ok(None)` when the directory does not exist.
fn read_dir_sorted(dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(DetectError::io(dir, e)),
    };

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| DetectError::io(dir, e))?;
    paths.sort();
    Ok(Some(paths))
}
