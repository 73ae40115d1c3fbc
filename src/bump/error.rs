use std::path::{Path, PathBuf};
use thiserror::Error;

pub use stamp::TemplateError;

/// Process exit codes, one per error kind.
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_IO: i32 = 3;
pub const EXIT_TEMPLATE: i32 = 4;

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("{0}")]
    Usage(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Template(#[from] TemplateError),
}

impl BumpError {
    pub fn usage(message: impl Into<String>) -> Self {
        BumpError::Usage(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        BumpError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            BumpError::Usage(_) => EXIT_USAGE,
            BumpError::Io { .. } => EXIT_IO,
            BumpError::Template(_) => EXIT_TEMPLATE,
        }
    }
}

pub type Result<T> = std::result::Result<T, BumpError>;
