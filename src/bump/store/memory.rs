use super::VersionStore;
use crate::error::{BumpError, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage for testing.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: HashMap<PathBuf, String>,
    read_only: HashSet<PathBuf>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, returning the store for chaining.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), content.to_string());
        self
    }

    /// Makes every create or write to `path` fail with permission denied.
    pub fn with_read_only(mut self, path: impl AsRef<Path>) -> Self {
        self.read_only.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Number of successful creates and writes.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(BumpError::io(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        Ok(())
    }
}

impl VersionStore for InMemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| BumpError::io(path, io::Error::from(io::ErrorKind::NotFound)))
    }

    fn create(&mut self, path: &Path, content: &str) -> Result<bool> {
        if self.files.contains_key(path) {
            return Ok(false);
        }
        self.check_writable(path)?;
        self.files.insert(path.to_path_buf(), content.to_string());
        self.writes += 1;
        Ok(true)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files.insert(path.to_path_buf(), content.to_string());
        self.writes += 1;
        Ok(())
    }
}
