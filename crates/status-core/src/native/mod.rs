//! The wireless package of the native configuration store

mod reader;
mod writer;

pub use reader::read_wireless;
pub use writer::{AppendedSection, WriteReport, write_wireless};
