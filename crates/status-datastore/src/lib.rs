//! Structured datastore contract for the status agent.
//!
//! Data lives at XPath-like addresses such as
//! `/status:wifi/wifi-device[name='radio0']/channel`. Edits are staged in a
//! [`Session`] and committed as one transaction; modules subscribed through
//! [`Datastore::subscribe_module_change`] see the transaction twice, first
//! as [`ChangeEvent::Verify`] (and may veto it) and then as
//! [`ChangeEvent::Apply`].
//!
//! [`MemoryDatastore`] is the in-process implementation used by the CLI and
//! the test suites.

pub mod change;
pub mod datastore;
pub mod error;
pub mod memory;
pub mod xpath;

pub use change::{
    Change, ChangeContext, ChangeEvent, ChangeHandler, ChangeOperation, HandlerError,
    HandlerResult, Item, TransactionId,
};
pub use datastore::{Datastore, Session, Subscription};
pub use error::{Error, Result};
pub use memory::MemoryDatastore;
pub use xpath::{DataPath, PathSegment, XPathBuilder, quote_value};
