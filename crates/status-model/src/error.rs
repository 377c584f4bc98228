//! Error types for status-model

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{kind} record has no identity key")]
    MissingIdentity { kind: &'static str },

    #[error("Duplicate {kind} key: {key}")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("No {kind} record named {key}")]
    RecordNotFound { kind: &'static str, key: String },
}
