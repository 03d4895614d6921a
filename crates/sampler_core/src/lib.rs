//! # sampler_core: Verifiable Ballot Selection for Risk-Limiting Audits
//!
//! ## Core Layer Role
//!
//! sampler_core turns a public seed and a ballot manifest into the list of
//! physical ballots an audit must pull. Every step is a pure, deterministic
//! function so any third party with the same seed and manifest reproduces
//! the identical sample:
//!
//! - Hash-chain position generator (`hash_chain`)
//! - Sampling sequence producers, selection order and file order (`sequence`)
//! - Position to ballot-identifier resolution (`manifest`)
//! - Natural ordering of identifiers for retrieval (`natural`)
//! - The end-to-end pipeline with injected audit sinks (`selection`, `sink`)
//! - Manual re-derivation transcript (`transcript`)
//! - Data model and errors (`types`)
//!
//! ## Dependencies
//!
//! - sha2, num-bigint, hex: digest, full-width reduction, display
//! - thiserror: Error types
//! - tracing: Events from [`sink::TracingSink`] only; no subscriber is installed here
//! - rayon: Parallel resolution (optional, `parallel` feature)
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use sampler_core::selection::BallotSelector;
//! use sampler_core::sink::NullSink;
//! use sampler_core::types::{Batch, Manifest};
//!
//! let manifest = Manifest::new(vec![
//!     Batch::new("Adams", 1, 1, 90, ""),
//!     Batch::new("Boulder", 1, 1, 10, ""),
//! ]);
//!
//! let selection = BallotSelector::new()
//!     .select("01234567890123456789", &manifest, 4, &mut NullSink)
//!     .unwrap();
//!
//! assert_eq!(selection.positions(), vec![35, 9, 33, 96]);
//! assert_eq!(selection.ids()[3], "Boulder-1-1-6");
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Resolve positions on the rayon thread pool
//! - `serde`: Enable serialisation for batches, identifiers and selections

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod hash_chain;
pub mod manifest;
pub mod natural;
pub mod selection;
pub mod sequence;
pub mod sink;
pub mod transcript;
pub mod types;

pub use selection::{select_ballots_to_audit, BallotSelector, Resolver, SelectedBallot, Selection};
pub use types::{BallotId, Batch, Manifest, SelectionError};
