//! Change handling for the status module
//!
//! This module provides:
//! - **phase**: the per-transaction verify/apply state machine
//! - **validator**: rejection of edits to read-only subtrees
//! - **translate**: mapping of WiFi datastore changes onto the state model
//! - **engine**: the [`SyncEngine`] change handler tying them together

mod engine;
mod phase;
mod translate;
mod validator;

pub use engine::{ApplyReport, SyncEngine, SyncOptions};
pub use phase::{Phase, PhaseTracker};
pub use translate::apply_changes;
pub use validator::ChangeValidator;
