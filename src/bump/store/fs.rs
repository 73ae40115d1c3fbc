use super::VersionStore;
use crate::error::{BumpError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }
}

impl VersionStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| BumpError::io(path, e))
    }

    fn create(&mut self, path: &Path, content: &str) -> Result<bool> {
        // create_new fails instead of truncating if the file appeared meanwhile
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(BumpError::io(path, e)),
        };
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| BumpError::io(path, e))?;
        Ok(true)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| BumpError::io(path, e))
    }
}
