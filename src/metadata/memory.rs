//! In-memory package registry.
//!
//! Useful for tests and for callers that already know a package's metadata.

use std::collections::HashMap;

use super::{normalize_name, Distribution, PackageRegistry};
use crate::error::Result;

/// Metadata files of one package, held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDistribution {
    files: HashMap<String, String>,
}

impl InMemoryDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata file.
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(name.into(), contents.into());
        self
    }
}

impl Distribution for InMemoryDistribution {
    fn read_text(&self, name: &str) -> Result<Option<String>> {
        Ok(self.files.get(name).cloned())
    }
}

/// Registry of in-memory packages keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    packages: HashMap<String, InMemoryDistribution>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package.
    pub fn with_package(mut self, name: &str, dist: InMemoryDistribution) -> Self {
        self.packages.insert(normalize_name(name), dist);
        self
    }
}

impl PackageRegistry for InMemoryRegistry {
    fn distribution(&self, name: &str) -> Result<Option<Box<dyn Distribution>>> {
        Ok(self
            .packages
            .get(&normalize_name(name))
            .cloned()
            .map(|dist| Box::new(dist) as Box<dyn Distribution>))
    }
}
