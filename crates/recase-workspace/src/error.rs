//! Error handling for recase-workspace

use recase_core::RecaseError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while discovering or processing files
///
/// [`LargeFile`](Self::LargeFile) and [`BinaryFile`](Self::BinaryFile) are reported per
/// file and never stop a walk. [`TooManyFiles`](Self::TooManyFiles) aborts it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WorkspaceError {
    #[error("large file: {} is {size} bytes (limit {limit})", path.display())]
    LargeFile { path: PathBuf, size: u64, limit: u64 },

    #[error("binary file: {}", path.display())]
    BinaryFile { path: PathBuf },

    #[error("too many files: more than {limit} found")]
    TooManyFiles { limit: usize },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] RecaseError),
}

impl WorkspaceError {
    /// Create a new I/O error for `path`
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new invalid glob error
    pub fn invalid_glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn is_large_file(&self) -> bool {
        matches!(self, Self::LargeFile { .. })
    }

    pub fn is_binary_file(&self) -> bool {
        matches!(self, Self::BinaryFile { .. })
    }

    pub fn is_too_many_files(&self) -> bool {
        matches!(self, Self::TooManyFiles { .. })
    }
}

impl From<ignore::Error> for WorkspaceError {
    fn from(err: ignore::Error) -> Self {
        Self::Walk(err.to_string())
    }
}

/// Result type alias for convenience
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
