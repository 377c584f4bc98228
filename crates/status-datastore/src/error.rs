//! Error types for datastore operations

/// Errors raised by datastore sessions and subscriptions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Key value cannot be quoted: {value}")]
    InvalidIdentifier { value: String },

    #[error("Item not found: {path}")]
    NotFound { path: String },

    #[error("Validation failed in module {module}: {message}")]
    ValidationFailed { module: String, message: String },

    #[error("Apply callback failed in module {module}: {message}")]
    CallbackFailed { module: String, message: String },

    #[error("Datastore is no longer available")]
    Closed,
}

impl Error {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
