//! Filesystem helpers for the status agent
//!
//! Provides normalized path handling, text reads that distinguish a missing
//! file from an unreadable one, atomic writes and loading of settings files
//! in TOML, JSON or YAML.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::NormalizedPath;
