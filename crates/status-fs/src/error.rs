//! Error types for status-fs

use std::path::PathBuf;

/// Result type for status-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in status-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} {path} as {format}: {message}")]
    ConfigParse {
        kind: &'static str,
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported {kind} format '{extension}' at {path}")]
    UnsupportedFormat {
        kind: &'static str,
        path: PathBuf,
        extension: String,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error is an I/O error caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
