//! # adapter_manifest: Ballot Manifest Ingestion
//!
//! ## Adapter Layer Role
//!
//! Reads county ballot manifests from CSV into [`sampler_core::Manifest`].
//! Parsing concerns stay here so the core works only with validated
//! batches in file order.
//!
//! ## Format
//!
//! One header row (skipped), then positional columns:
//!
//! ```text
//! county_name,scanner_id,batch_id,num_ballots,storage_location
//! Adams,1,1,90,Shelf A
//! Boulder,1,1,10,
//! ```
//!
//! `storage_location` is optional. Batches with zero ballots are kept and
//! contribute nothing to the population.

#![deny(missing_docs)]

mod error;
mod loader;

pub use error::ManifestError;
pub use loader::{ManifestLoader, MANIFEST_COLUMNS};
