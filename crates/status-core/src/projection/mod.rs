//! Projection of the state model into the datastore

pub mod paths;
mod projector;

pub use projector::{ProjectionReport, Projector};
