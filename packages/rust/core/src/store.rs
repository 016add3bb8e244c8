//! Read-only access to content fragments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use nodedocs_shared::{NodeDocsError, Result};

/// Where fragment files live. Paths are the ones produced by the resolver.
pub trait FragmentStore {
    /// Whether a fragment exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole fragment at `path`.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Fragments on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FragmentStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| NodeDocsError::io(path, e))
    }
}

/// In-memory fragments, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a fragment.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Builder-style [`MemoryStore::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl FragmentStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            NodeDocsError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "fragment not in store"),
            )
        })
    }
}
