//! Error types for status-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from status-core
    #[error(transparent)]
    Core(#[from] status_core::Error),

    /// Error from status-fs
    #[error(transparent)]
    Fs(#[from] status_fs::Error),

    /// Error from status-datastore
    #[error(transparent)]
    Datastore(#[from] status_datastore::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
