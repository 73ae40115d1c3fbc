//! # Storage Layer
//!
//! The [`VersionStore`] trait is the only way the pipeline touches files.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage on the real filesystem
//! - [`memory::InMemoryStore`]: In-memory storage for testing, with injectable
//!   write failures
//!
//! ## Guarantees
//!
//! - [`VersionStore::create`] never replaces an existing file. Input files are
//!   only ever created, never rewritten.
//! - [`VersionStore::write`] creates or truncates. It is used for output only.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for reading version files and writing rendered output.
pub trait VersionStore {
    /// Returns true if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads a UTF-8 text file.
    fn read(&self, path: &Path) -> Result<String>;

    /// Creates `path` with `content` unless it already exists.
    ///
    /// Returns `Ok(false)` without touching the file when it already exists.
    fn create(&mut self, path: &Path, content: &str) -> Result<bool>;

    /// Creates or truncates `path` and writes `content`.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;
}
