//! Shared test utilities for the status agent workspace.
//!
//! This crate provides fixtures used across crate test suites. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`bus`]: [`StaticBus`], a scripted RPC bus
//! - [`fixtures`]: wireless packages, board responses and lease files

pub mod bus;
pub mod fixtures;

pub use bus::StaticBus;
pub use fixtures::{LeaseFile, board_response, wireless_package};
