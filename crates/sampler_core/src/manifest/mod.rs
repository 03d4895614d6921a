//! # Manifest Resolution
//!
//! Maps a population position in `[1, N]` onto the batch that holds it and
//! the ballot's 1-based index within that batch.
//!
//! Batches are numbered by walking the manifest in row order: a batch whose
//! predecessors hold `offset` ballots owns positions
//! `offset + 1 ..= offset + cardcount`. The upper bound is inclusive, so a
//! position equal to the cumulative count through batch k is the *last*
//! ballot of batch k, never the first of batch k + 1.
//!
//! ## Module Structure
//!
//! - [`resolve`] / [`locate`]: Linear reference walk, O(batches)
//! - [`index`]: Prefix-sum index with binary search, O(log batches), checked
//!   against the linear walk

pub mod index;

pub use index::CumulativeIndex;

use crate::types::{BallotId, Batch, SelectionError};

/// Where a position lands: batch index in manifest order and 1-based
/// position within that batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSlot {
    /// Index of the batch in manifest order
    pub batch_index: usize,
    /// 1-based position inside the batch
    pub within_batch: u64,
}

/// Locates `selection` with the linear reference walk.
///
/// # Errors
///
/// `OutOfRange` if `selection` is 0 or greater than the manifest total.
pub fn locate(batches: &[Batch], selection: u64) -> Result<BatchSlot, SelectionError> {
    let mut offset = 0u64;
    for (batch_index, batch) in batches.iter().enumerate() {
        // Inclusive upper bound: `selection <= offset + cardcount`.
        if selection > offset && selection - offset <= batch.cardcount {
            return Ok(BatchSlot {
                batch_index,
                within_batch: selection - offset,
            });
        }
        offset = offset.saturating_add(batch.cardcount);
    }
    Err(SelectionError::OutOfRange {
        position: selection,
        population: offset,
    })
}

/// Resolves `selection` to a ballot identifier with the linear walk.
///
/// # Examples
///
/// ```rust
/// use sampler_core::manifest::resolve;
/// use sampler_core::types::Batch;
///
/// let batches = [Batch::new("Adams", 1, 1, 90, ""), Batch::new("Boulder", 1, 1, 10, "")];
/// assert_eq!(resolve(&batches, 90).unwrap().to_string(), "Adams-1-1-90");
/// assert_eq!(resolve(&batches, 91).unwrap().to_string(), "Boulder-1-1-1");
/// assert!(resolve(&batches, 101).is_err());
/// ```
pub fn resolve(batches: &[Batch], selection: u64) -> Result<BallotId, SelectionError> {
    let slot = locate(batches, selection)?;
    Ok(BallotId::within(&batches[slot.batch_index], slot.within_batch))
}
