//! # Sampling Sequence Production
//!
//! A [`SequenceProducer`] turns `(n, with_replacement, low, high, seed, skip)`
//! into an ordered sequence of n integers in `[low, high]`. That sequence is
//! the *selection order*: the order in which ballots are drawn at the public
//! ceremony. Sorting it gives the *file order* used for physical retrieval.
//!
//! [`HashChainSampler`] is the reference producer. With replacement, its k-th
//! value is exactly the hash-chain position for index k, so any compatible
//! substitute can be checked against [`crate::hash_chain::position`].
//!
//! ## Module Structure
//!
//! - [`HashChainSampler`]: The hash-chain reference producer

mod sampler;

pub use sampler::HashChainSampler;

use crate::types::SelectionError;

/// Producer-specific information about how a sequence was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleMetadata {
    /// Number of hash evaluations performed
    pub draws: u64,
    /// Draws rejected because the value had already been selected
    pub duplicates_rejected: u64,
    /// Leading values discarded by the `skip` argument
    pub skipped: usize,
    /// Whether values may repeat
    pub with_replacement: bool,
}

/// Source of an ordered pseudorandom sample.
///
/// Implementations must be deterministic in all arguments. Duplicates in a
/// with-replacement sample are part of the result and must not be removed.
pub trait SequenceProducer {
    /// Draws `n` integers from `[low, high]` in selection order, after
    /// discarding the first `skip` values.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty seed, an inverted or overflowing range,
    /// or (without replacement) more values than the range holds.
    fn generate(
        &self,
        n: usize,
        with_replacement: bool,
        low: u64,
        high: u64,
        seed: &str,
        skip: usize,
    ) -> Result<(SampleMetadata, Vec<u64>), SelectionError>;
}

/// File order: the stable ascending sort of a selection-order sequence.
///
/// # Examples
///
/// ```rust
/// use sampler_core::sequence::file_order;
///
/// assert_eq!(file_order(&[35, 9, 33, 9]), vec![9, 9, 33, 35]);
/// ```
pub fn file_order(selection_order: &[u64]) -> Vec<u64> {
    let mut sorted = selection_order.to_vec();
    sorted.sort();
    sorted
}
