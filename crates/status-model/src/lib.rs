//! Record types and the in-memory state model for the status agent.
//!
//! The [`StateModel`] is the hand-off structure between the collectors that
//! read native sources and the consumers that project into the datastore or
//! write back to the native configuration store.

pub mod board;
pub mod error;
pub mod lease;
pub mod model;
pub mod wifi;

pub use board::{BoardInfo, ReleaseInfo};
pub use error::{Error, Result};
pub use lease::DhcpLease;
pub use model::StateModel;
pub use wifi::{WifiDevice, WifiInterface, WirelessConfig};
