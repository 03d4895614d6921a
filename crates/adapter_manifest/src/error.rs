//! Manifest loading error types.

use thiserror::Error;

/// Errors raised while reading a ballot manifest.
///
/// # Variants
///
/// - `Io`: The manifest file could not be opened or read
/// - `Csv`: The input is not well-formed CSV
/// - `InvalidRow`: A data row is missing columns or has a bad ballot count
/// - `Empty`: The file holds a header but no batches
///
/// # Examples
///
/// ```
/// use adapter_manifest::ManifestError;
///
/// let err = ManifestError::InvalidRow { line: 3, reason: "ballot count 'x'".into() };
/// assert!(err.to_string().contains("line 3"));
/// ```
#[derive(Error, Debug)]
pub enum ManifestError {
    /// I/O failure opening or reading the manifest.
    #[error("Manifest I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("Manifest CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row that cannot become a batch.
    #[error("Invalid manifest row at line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the file, header included
        line: u64,
        /// What was wrong with the row
        reason: String,
    },

    /// No data rows after the header.
    #[error("Manifest contains no batches")]
    Empty,
}
