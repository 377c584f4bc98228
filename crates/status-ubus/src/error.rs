//! Error types for RPC bus calls

/// Errors raised by bus adapters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bus object not found: {object}")]
    ObjectNotFound { object: String },

    #[error("Method {method} not found on {object}")]
    MethodNotFound { object: String, method: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Bus call {object}.{method} failed (exit code {status}): {stderr}")]
    CallFailed {
        object: String,
        method: String,
        status: i32,
        stderr: String,
    },

    #[error("Invalid JSON from {object}.{method}: {source}")]
    InvalidJson {
        object: String,
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
