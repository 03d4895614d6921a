//! Core data model: batches, manifests, ballot identifiers and errors.

pub mod ballot;
pub mod batch;
pub mod error;

pub use ballot::BallotId;
pub use batch::{Batch, Manifest};
pub use error::SelectionError;
