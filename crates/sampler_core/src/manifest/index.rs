//! Prefix-sum index for O(log batches) resolution.

use super::{locate, BatchSlot};
use crate::types::batch::add_batch;
use crate::types::{BallotId, Batch, Manifest, SelectionError};

/// Cumulative ballot counts over a manifest snapshot.
///
/// `ends[k]` is the number of ballots in batches `0..=k`, so batch `k` owns
/// positions `ends[k] - cardcount + 1 ..= ends[k]`. A lookup finds the first
/// batch whose end is at or beyond the position, which is the same batch the
/// linear walk stops at (including empty batches sharing an end value).
///
/// Results must match [`locate`]; [`CumulativeIndex::verify`] checks that at
/// every batch edge before the index is trusted.
///
/// # Examples
///
/// ```rust
/// use sampler_core::manifest::CumulativeIndex;
/// use sampler_core::types::{Batch, Manifest};
///
/// let manifest = Manifest::new(vec![
///     Batch::new("Adams", 1, 1, 90, ""),
///     Batch::new("Boulder", 1, 1, 10, ""),
/// ]);
/// let index = CumulativeIndex::build(&manifest).unwrap();
/// assert_eq!(index.population(), 100);
/// assert_eq!(index.resolve(96).unwrap().to_string(), "Boulder-1-1-6");
/// ```
#[derive(Debug, Clone)]
pub struct CumulativeIndex<'a> {
    batches: &'a [Batch],
    ends: Vec<u64>,
}

impl<'a> CumulativeIndex<'a> {
    /// Builds the prefix sums.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the total ballot count overflows.
    pub fn build(manifest: &'a Manifest) -> Result<Self, SelectionError> {
        Self::from_batches(manifest.batches())
    }

    /// Builds the prefix sums over a batch slice.
    pub fn from_batches(batches: &'a [Batch]) -> Result<Self, SelectionError> {
        let mut ends = Vec::with_capacity(batches.len());
        let mut total = 0u64;
        for batch in batches {
            total = add_batch(total, batch)?;
            ends.push(total);
        }
        Ok(Self { batches, ends })
    }

    /// Total ballots N.
    pub fn population(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Locates `selection` by binary search.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `selection` is 0 or greater than N.
    pub fn locate(&self, selection: u64) -> Result<BatchSlot, SelectionError> {
        let population = self.population();
        if selection == 0 || selection > population {
            return Err(SelectionError::OutOfRange {
                position: selection,
                population,
            });
        }
        let batch_index = self.ends.partition_point(|&end| end < selection);
        let offset = self.ends[batch_index] - self.batches[batch_index].cardcount;
        Ok(BatchSlot {
            batch_index,
            within_batch: selection - offset,
        })
    }

    /// Resolves `selection` to a ballot identifier.
    pub fn resolve(&self, selection: u64) -> Result<BallotId, SelectionError> {
        let slot = self.locate(selection)?;
        Ok(BallotId::within(
            &self.batches[slot.batch_index],
            slot.within_batch,
        ))
    }

    /// Batch holding `slot`.
    pub fn batch(&self, slot: BatchSlot) -> &'a Batch {
        &self.batches[slot.batch_index]
    }

    /// Checks the index against the linear walk at each batch's first and
    /// last position and one past the end of the manifest.
    ///
    /// Returns the number of positions compared.
    ///
    /// # Errors
    ///
    /// `IndexMismatch` naming the first position where the two disagree.
    pub fn verify(&self) -> Result<usize, SelectionError> {
        let mut probes = Vec::with_capacity(self.ends.len() * 2 + 1);
        for (batch, &end) in self.batches.iter().zip(&self.ends) {
            if batch.cardcount > 0 {
                probes.push(end - batch.cardcount + 1);
                probes.push(end);
            }
        }
        probes.push(self.population().saturating_add(1));
        probes.dedup();

        for &position in &probes {
            let linear = locate(self.batches, position);
            let indexed = self.locate(position);
            if linear != indexed {
                return Err(SelectionError::IndexMismatch {
                    position,
                    linear: self.describe(linear),
                    indexed: self.describe(indexed),
                });
            }
        }
        Ok(probes.len())
    }

    fn describe(&self, outcome: Result<BatchSlot, SelectionError>) -> String {
        match outcome {
            Ok(slot) => BallotId::within(self.batch(slot), slot.within_batch).to_string(),
            Err(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest::new(vec![
            Batch::new("Adams", 1, 1, 90, ""),
            Batch::new("Arapahoe", 2, 7, 0, ""),
            Batch::new("Boulder", 1, 1, 10, ""),
            Batch::new("Denver", 3, 12, 1, ""),
        ])
    }

    #[test]
    fn test_overflow_reported_like_population() {
        let manifest = Manifest::new(vec![
            Batch::new("Adams", 1, 1, u64::MAX, ""),
            Batch::new("Boulder", 1, 1, 1, ""),
        ]);
        let from_index = CumulativeIndex::build(&manifest).unwrap_err();
        assert_eq!(from_index, manifest.population().unwrap_err());
        assert!(from_index.to_string().contains("Boulder-1-1"));
    }

    #[test]
    fn test_population() {
        let manifest = manifest();
        let index = CumulativeIndex::build(&manifest).unwrap();
        assert_eq!(index.population(), 101);
    }

    #[test]
    fn test_boundaries_match_linear_walk() {
        let manifest = manifest();
        let index = CumulativeIndex::build(&manifest).unwrap();
        for position in [1, 90, 91, 100, 101] {
            assert_eq!(
                index.locate(position),
                locate(manifest.batches(), position),
                "position {}",
                position
            );
        }
    }

    #[test]
    fn test_verify_counts_probes() {
        let manifest = manifest();
        let index = CumulativeIndex::build(&manifest).unwrap();
        // Adams 1, 90; Boulder 91, 100; Denver 101 (first == last); past end 102.
        assert_eq!(index.verify().unwrap(), 6);
    }

    #[test]
    fn test_out_of_range() {
        let manifest = manifest();
        let index = CumulativeIndex::build(&manifest).unwrap();
        assert!(matches!(
            index.locate(0),
            Err(SelectionError::OutOfRange { .. })
        ));
        assert_eq!(
            index.locate(102),
            Err(SelectionError::OutOfRange {
                position: 102,
                population: 101
            })
        );
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::default();
        let index = CumulativeIndex::build(&manifest).unwrap();
        assert_eq!(index.population(), 0);
        assert!(index.locate(1).is_err());
        assert_eq!(index.verify().unwrap(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_index_matches_linear_everywhere(
                counts in prop::collection::vec(0u64..25, 0..25)
            ) {
                let manifest: Manifest = counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| Batch::new("County", i % 3, i, count, ""))
                    .collect();
                let index = CumulativeIndex::build(&manifest).unwrap();
                prop_assert!(index.verify().is_ok());
                for position in 0..=index.population() + 1 {
                    prop_assert_eq!(
                        index.locate(position),
                        locate(manifest.batches(), position)
                    );
                }
            }
        }
    }
}
