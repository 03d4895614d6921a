//! Human-checkable ballot identifiers.

use std::fmt;

use super::batch::Batch;

/// Identifier of one physical ballot: `{county}-{scanner}-{batch}-{position}`.
///
/// `position` is the 1-based index of the ballot within its batch. The
/// rendered string is the unit handed to auditors and must be reproduced
/// byte for byte by any conforming implementation.
///
/// # Examples
/// ```
/// use sampler_core::types::{BallotId, Batch};
///
/// let batch = Batch::new("Boulder", 1, 1, 10, "");
/// let id = BallotId::within(&batch, 6);
/// assert_eq!(id.to_string(), "Boulder-1-1-6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallotId {
    /// County name
    pub county: String,
    /// Scanner identifier
    pub scanner: String,
    /// Batch identifier
    pub batch: String,
    /// 1-based position within the batch
    pub position: u64,
}

impl BallotId {
    /// Identifier of the ballot at `position` (1-based) inside `batch`.
    pub fn within(batch: &Batch, position: u64) -> Self {
        Self {
            county: batch.county.clone(),
            scanner: batch.scanner.clone(),
            batch: batch.batch.clone(),
            position,
        }
    }
}

impl fmt::Display for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.county, self.scanner, self.batch, self.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scanner_keeps_both_dashes() {
        let batch = Batch::new("Orange County", "", 48256, 300, "");
        assert_eq!(
            BallotId::within(&batch, 242).to_string(),
            "Orange County--48256-242"
        );
    }
}
