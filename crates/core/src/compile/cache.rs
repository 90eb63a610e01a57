//! Per-class cache of compiled base names.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::CompileError;

/// File name of the cache inside a class directory.
pub const CACHE_FILE_NAME: &str = ".compiled";

/// Set of base names whose documents are known to be compiled.
///
/// Stored as one name per line, sorted and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCache {
    path: PathBuf,
    names: BTreeSet<String>,
}

impl CompileCache {
    /// Loads the cache of `class_dir`. A missing file is an empty cache.
    ///
    /// # Errors
    ///
    /// Returns `Cache` if the file exists but cannot be read.
    pub fn load(class_dir: &Path) -> Result<Self, CompileError> {
        let path = class_dir.join(CACHE_FILE_NAME);
        let names = match fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeSet::new(),
            Err(source) => return Err(CompileError::Cache { path, source }),
        };
        Ok(Self { path, names })
    }

    /// Path of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `base_name` is cached.
    #[must_use]
    pub fn contains(&self, base_name: &str) -> bool {
        self.names.contains(base_name)
    }

    /// Adds a base name.
    pub fn insert(&mut self, base_name: &str) {
        self.names.insert(base_name.to_string());
    }

    /// Removes a base name.
    pub fn remove(&mut self, base_name: &str) {
        self.names.remove(base_name);
    }

    /// Cached names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Rewrites the cache file.
    ///
    /// # Errors
    ///
    /// Returns `Cache` if the file cannot be written.
    pub fn save(&self) -> Result<(), CompileError> {
        let mut contents = String::new();
        for name in &self.names {
            contents.push_str(name);
            contents.push('\n');
        }
        fs::write(&self.path, contents).map_err(|source| CompileError::Cache {
            path: self.path.clone(),
            source,
        })
    }
}
