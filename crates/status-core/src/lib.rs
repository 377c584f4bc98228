//! Core engine of the status agent
//!
//! This crate ties the native sources to the structured datastore:
//!
//! - **collect**: board facts over the RPC bus and the DHCP lease table
//! - **native**: reading and writing the wireless package of the native store
//! - **projection**: writing the [`StateModel`] into the datastore
//! - **sync**: the change handler that validates edits and writes accepted
//!   WiFi edits back to the native store
//! - **plugin**: the [`Agent`] lifecycle (collect, project, subscribe)
//!
//! # Architecture
//!
//! ```text
//!            status-cli
//!                |
//!           status-core
//!                |
//!   +-------+----+-----+----------+-----------+
//!   |       |          |          |           |
//! status-fs status-model status-uci status-ubus status-datastore
//! ```

pub mod collect;
pub mod config;
pub mod error;
pub mod native;
pub mod plugin;
pub mod projection;
pub mod service;
pub mod sync;

pub use collect::{CollectReport, collect};
pub use config::{AgentConfig, ReloadConfig};
pub use error::{Error, Result};
pub use native::{AppendedSection, WriteReport, read_wireless, write_wireless};
pub use plugin::Agent;
pub use projection::{ProjectionReport, Projector};
pub use service::{CommandReloader, NoopReloader, ServiceReloader};
pub use status_model::StateModel;
pub use sync::{ApplyReport, ChangeValidator, Phase, PhaseTracker, SyncEngine, SyncOptions};
