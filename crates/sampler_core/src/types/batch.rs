//! Ballot batches and the ordered manifest that numbers them.

use super::error::SelectionError;

/// One physical batch of ballots from the manifest.
///
/// A batch is identified by county, scanner and batch identifier, and holds
/// `cardcount` ballots stored at `location`.
///
/// # Examples
/// ```
/// use sampler_core::types::Batch;
///
/// let batch = Batch::new("Adams", 1, 1, 90, "Shelf A");
/// assert_eq!(batch.scanner, "1");
/// assert_eq!(batch.cardcount, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    /// County name
    pub county: String,
    /// Scanner identifier
    pub scanner: String,
    /// Batch identifier within the scanner
    pub batch: String,
    /// Number of ballots physically in the batch
    pub cardcount: u64,
    /// Free-text storage location
    pub location: String,
}

impl Batch {
    /// Creates a batch. Scanner and batch identifiers accept any displayable
    /// value so numeric manifests read naturally.
    pub fn new(
        county: impl Into<String>,
        scanner: impl ToString,
        batch: impl ToString,
        cardcount: u64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            county: county.into(),
            scanner: scanner.to_string(),
            batch: batch.to_string(),
            cardcount,
            location: location.into(),
        }
    }
}

/// Ordered, immutable sequence of batches.
///
/// Row order is authoritative: it defines the cumulative numbering used to
/// map a population position onto a batch. Batches are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    batches: Vec<Batch>,
}

impl Manifest {
    /// Wraps batches in manifest order.
    pub fn new(batches: Vec<Batch>) -> Self {
        Self { batches }
    }

    /// Batches in manifest order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns `true` if the manifest has no batches.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total ballots N, the sum of every batch's count.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the sum does not fit in a `u64`.
    pub fn population(&self) -> Result<u64, SelectionError> {
        population_of(&self.batches)
    }
}

impl From<Vec<Batch>> for Manifest {
    fn from(batches: Vec<Batch>) -> Self {
        Self::new(batches)
    }
}

impl FromIterator<Batch> for Manifest {
    fn from_iter<I: IntoIterator<Item = Batch>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Running total after `batch`; fails when the count no longer fits a `u64`.
pub(crate) fn add_batch(total: u64, batch: &Batch) -> Result<u64, SelectionError> {
    total.checked_add(batch.cardcount).ok_or_else(|| {
        SelectionError::invalid_input(format!(
            "ballot count overflows at batch {}-{}-{}",
            batch.county, batch.scanner, batch.batch
        ))
    })
}

/// Sums ballot counts over a batch slice.
pub(crate) fn population_of(batches: &[Batch]) -> Result<u64, SelectionError> {
    batches.iter().try_fold(0u64, add_batch)
}
