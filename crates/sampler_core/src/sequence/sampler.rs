//! Hash-chain reference producer.

use std::collections::HashSet;

use super::{SampleMetadata, SequenceProducer};
use crate::hash_chain::{digest, reduce};
use crate::types::SelectionError;

/// Reference [`SequenceProducer`] built on the hash chain.
///
/// Draw counter k runs 1, 2, 3, ...; draw k yields
/// `low + (SHA-256("{seed},{k}") mod (high - low + 1))`. Without replacement
/// a value already selected is rejected and the counter moves on.
///
/// # Examples
///
/// ```rust
/// use sampler_core::sequence::{HashChainSampler, SequenceProducer};
///
/// let (meta, values) = HashChainSampler
///     .generate(4, true, 1, 100, "01234567890123456789", 0)
///     .unwrap();
/// assert_eq!(values, vec![35, 9, 33, 96]);
/// assert_eq!(meta.draws, 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashChainSampler;

impl SequenceProducer for HashChainSampler {
    fn generate(
        &self,
        n: usize,
        with_replacement: bool,
        low: u64,
        high: u64,
        seed: &str,
        skip: usize,
    ) -> Result<(SampleMetadata, Vec<u64>), SelectionError> {
        if seed.is_empty() {
            return Err(SelectionError::invalid_input("seed must not be empty"));
        }
        if low > high {
            return Err(SelectionError::invalid_input(format!(
                "range is inverted: low {low} > high {high}"
            )));
        }
        let width = (high - low).checked_add(1).ok_or_else(|| {
            SelectionError::invalid_input(format!("range [{low}, {high}] is too wide"))
        })?;
        let wanted = n.checked_add(skip).ok_or_else(|| {
            SelectionError::invalid_input(format!("sample size {n} plus skip {skip} overflows"))
        })?;
        if !with_replacement && wanted as u128 > width as u128 {
            return Err(SelectionError::invalid_input(format!(
                "cannot draw {wanted} distinct values from a range of {width}"
            )));
        }

        let mut metadata = SampleMetadata {
            skipped: skip,
            with_replacement,
            ..SampleMetadata::default()
        };
        let mut values: Vec<u64> = Vec::new();
        values.try_reserve_exact(wanted).map_err(|_| {
            SelectionError::invalid_input(format!(
                "sample size {n} (plus skip {skip}) is too large to hold in memory"
            ))
        })?;
        let mut seen = HashSet::new();

        while values.len() < wanted {
            metadata.draws += 1;
            let pick = reduce(&digest(seed, metadata.draws), low, width);
            if with_replacement || seen.insert(pick) {
                values.push(pick);
            } else {
                metadata.duplicates_rejected += 1;
            }
        }

        Ok((metadata, values.split_off(skip)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_chain::position;

    const SEED: &str = "01234567890123456789";

    #[test]
    fn test_matches_hash_chain_with_replacement() {
        let (_, values) = HashChainSampler
            .generate(50, true, 1, 100, SEED, 0)
            .unwrap();
        for (i, value) in values.iter().enumerate() {
            assert_eq!(*value, position(SEED, i as u64 + 1, 100).unwrap());
        }
    }

    #[test]
    fn test_with_replacement_keeps_duplicates() {
        // Draws 12 and 13 both land on 4.
        let (meta, values) = HashChainSampler
            .generate(13, true, 1, 100, SEED, 0)
            .unwrap();
        assert_eq!(&values[11..], &[4, 4]);
        assert_eq!(meta.duplicates_rejected, 0);
        assert_eq!(meta.draws, 13);
    }

    #[test]
    fn test_without_replacement_rejects_repeats() {
        let (meta, values) = HashChainSampler
            .generate(13, false, 1, 100, SEED, 0)
            .unwrap();
        assert_eq!(
            values,
            vec![35, 9, 33, 96, 69, 39, 88, 13, 61, 54, 16, 4, 30]
        );
        assert_eq!(meta.duplicates_rejected, 1);
        assert_eq!(meta.draws, 14);
    }

    #[test]
    fn test_huge_sample_size_is_an_error() {
        let err = HashChainSampler
            .generate(usize::MAX / 4, true, 1, 90, SEED, 0)
            .unwrap_err();
        match err {
            SelectionError::InvalidInput(msg) => assert!(msg.contains("too large")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_drops_leading_values() {
        let (meta, values) = HashChainSampler
            .generate(2, true, 1, 100, SEED, 2)
            .unwrap();
        assert_eq!(values, vec![33, 96]);
        assert_eq!(meta.skipped, 2);
    }

    #[test]
    fn test_offset_range() {
        let (_, values) = HashChainSampler
            .generate(100, true, 1000, 1009, SEED, 0)
            .unwrap();
        assert!(values.iter().all(|v| (1000..=1009).contains(v)));
    }

    #[test]
    fn test_full_range_without_replacement_is_permutation() {
        let (_, mut values) = HashChainSampler
            .generate(10, false, 1, 10, SEED, 0)
            .unwrap();
        values.sort();
        assert_eq!(values, (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_too_many_distinct_values_rejected() {
        let result = HashChainSampler.generate(11, false, 1, 10, SEED, 0);
        assert!(matches!(result, Err(SelectionError::InvalidInput(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = HashChainSampler.generate(1, true, 10, 1, SEED, 0);
        assert!(matches!(result, Err(SelectionError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_draws() {
        let (meta, values) = HashChainSampler
            .generate(0, true, 1, 100, SEED, 0)
            .unwrap();
        assert!(values.is_empty());
        assert_eq!(meta.draws, 0);
    }
}
