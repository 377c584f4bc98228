//! Native configuration store access for the status agent.
//!
//! The device keeps its configuration in packages of typed sections holding
//! ordered key/value options. This crate provides:
//!
//! - [`NativeStore`]: the load/set/delete/add_list/add/commit/revert contract
//! - [`UciPath`]: dotted paths, including position-addressed sections
//!   such as `wireless.@wifi-iface[0].ssid`
//! - [`parser`]: decoding of `uci show` output into a [`Package`]
//! - [`UciCli`]: a store backed by the device's `uci` tool
//! - [`MemoryStore`]: an in-memory store with staged and committed state

pub mod cli;
pub mod error;
pub mod memory;
pub mod package;
pub mod parser;
pub mod path;
pub mod store;

pub use cli::UciCli;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use package::{Package, Section};
pub use parser::parse_show_output;
pub use path::{SectionRef, UciPath};
pub use store::NativeStore;
