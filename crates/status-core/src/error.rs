//! Error types for status-core

use status_datastore::{ChangeEvent, TransactionId};

/// Result type for status-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in status-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edit touched operational state that cannot be changed
    #[error("Path is read-only: {path}")]
    ReadOnlyPath { path: String },

    /// A change event arrived that does not fit the transaction in progress
    #[error("{event} for {requested} rejected while {active} is in flight")]
    TransactionInFlight {
        event: ChangeEvent,
        active: TransactionId,
        requested: TransactionId,
    },

    /// A value cannot be written to the native store
    #[error("Invalid argument for {path}: {reason}")]
    InvalidArgument { path: String, reason: String },

    /// The DHCP lease file does not exist
    #[error("Lease file not found: {path}")]
    LeaseFileNotFound { path: String },

    /// The DHCP lease file holds no lease lines
    #[error("Lease file is empty: {path}")]
    LeaseFileEmpty { path: String },

    /// A bus response did not have the expected shape
    #[error("Malformed response from {object}.{method}: {reason}")]
    MalformedResponse {
        object: String,
        method: String,
        reason: String,
    },

    /// The service reload command could not be run or failed
    #[error("Reload via {command} failed: {message}")]
    Reload { command: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from status-fs
    #[error(transparent)]
    Fs(#[from] status_fs::Error),

    /// Model error from status-model
    #[error(transparent)]
    Model(#[from] status_model::Error),

    /// Native store error from status-uci
    #[error(transparent)]
    Uci(#[from] status_uci::Error),

    /// Bus error from status-ubus
    #[error(transparent)]
    Ubus(#[from] status_ubus::Error),

    /// Datastore error from status-datastore
    #[error(transparent)]
    Datastore(#[from] status_datastore::Error),
}

impl Error {
    /// True for errors that only mean a source is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LeaseFileNotFound { .. }
                | Self::Uci(status_uci::Error::PackageNotFound { .. })
                | Self::Ubus(status_ubus::Error::ObjectNotFound { .. })
        )
    }
}
