//! Error types for ballot selection.
//!
//! Every error is fatal for a selection run: the computations are
//! deterministic, so retrying cannot change the outcome, and a partial
//! sample must never reach an auditor.

use thiserror::Error;

/// Categorised selection errors.
///
/// # Variants
/// - `InvalidInput`: Bad arguments (zero population, empty seed, empty manifest)
/// - `OutOfRange`: A position the manifest cannot resolve
/// - `PopulationMismatch`: Declared population differs from the manifest total
/// - `IndexMismatch`: The cumulative index disagrees with the linear walk
///
/// # Examples
/// ```
/// use sampler_core::types::SelectionError;
///
/// let err = SelectionError::OutOfRange { position: 101, population: 100 };
/// assert_eq!(
///     format!("{}", err),
///     "Position 101 is outside the manifest population of 100 ballots"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Position could not be resolved against the manifest.
    #[error("Position {position} is outside the manifest population of {population} ballots")]
    OutOfRange {
        /// The unresolvable position
        position: u64,
        /// Total ballots in the manifest
        population: u64,
    },

    /// Declared population size does not match the manifest.
    #[error("Declared population {declared} does not match manifest total {manifest}")]
    PopulationMismatch {
        /// Population size supplied by the caller
        declared: u64,
        /// Sum of ballot counts over the manifest
        manifest: u64,
    },

    /// Cumulative index resolved a position differently from the linear walk.
    #[error("Position {position} resolved to {indexed} by the cumulative index but {linear} by the linear walk")]
    IndexMismatch {
        /// Position that disagreed
        position: u64,
        /// Identifier from the linear walk
        linear: String,
        /// Identifier from the cumulative index
        indexed: String,
    },
}

impl SelectionError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = SelectionError::invalid_input("population must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid input: population must be positive, got 0"
        );
    }

    #[test]
    fn test_population_mismatch_names_both_values() {
        let err = SelectionError::PopulationMismatch {
            declared: 120,
            manifest: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_index_mismatch_display() {
        let err = SelectionError::IndexMismatch {
            position: 91,
            linear: "Boulder-1-1-1".to_string(),
            indexed: "Adams-1-1-91".to_string(),
        };
        assert!(err.to_string().contains("Boulder-1-1-1"));
        assert!(err.to_string().contains("Adams-1-1-91"));
    }
}
