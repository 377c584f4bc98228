//! RPC bus access for the status agent.
//!
//! The device exposes system facts as methods on named bus objects, for
//! example `system board`. [`RpcBus`] is the call contract; [`UbusCli`]
//! implements it on top of the `ubus` command-line client.

pub mod bus;
pub mod cli;
pub mod error;

pub use bus::RpcBus;
pub use cli::UbusCli;
pub use error::{Error, Result};
