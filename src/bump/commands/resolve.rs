use crate::config::DEFAULT_CONTENT;
use crate::error::Result;
use crate::store::VersionStore;
use std::path::{Path, PathBuf};
use tracing::info;

/// An input file ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub source: String,
    pub created: bool,
}

/// Reads the input file at `path`, creating it with [`DEFAULT_CONTENT`] first
/// if it does not exist. An existing file is never modified.
pub fn run<S: VersionStore>(store: &mut S, path: &Path) -> Result<ResolvedInput> {
    if !store.exists(path) && store.create(path, DEFAULT_CONTENT)? {
        return Ok(ResolvedInput {
            path: path.to_path_buf(),
            source: DEFAULT_CONTENT.to_string(),
            created: true,
        });
    }

    info!("reading input file {}", path.display());
    let source = store.read(path)?;
    Ok(ResolvedInput {
        path: path.to_path_buf(),
        source,
        created: false,
    })
}
