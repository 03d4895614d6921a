//! CSV manifest loader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use sampler_core::{Batch, Manifest};
use tracing::debug;

use crate::error::ManifestError;

/// Column names in manifest order. Only the position matters: header text
/// varies between counties and is not checked.
pub const MANIFEST_COLUMNS: [&str; 5] = [
    "county_name",
    "scanner_id",
    "batch_id",
    "num_ballots",
    "storage_location",
];

/// Columns every data row must carry; `storage_location` may be absent.
const REQUIRED_COLUMNS: usize = 4;

/// Loads ballot manifests from CSV.
///
/// The first row is a header and is skipped. Data rows are read
/// positionally as `county_name, scanner_id, batch_id, num_ballots,
/// storage_location`, with surrounding whitespace trimmed. Batch order in
/// the file is the manifest order used for resolution.
pub struct ManifestLoader;

impl ManifestLoader {
    /// Load a manifest from a CSV file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened, otherwise as [`ManifestLoader::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let manifest = Self::from_reader(file)?;
        debug!(path = %path.display(), batches = manifest.len(), "Loaded manifest");
        Ok(manifest)
    }

    /// Load a manifest from any CSV source.
    ///
    /// # Errors
    ///
    /// - `Csv` for malformed CSV
    /// - `InvalidRow` for a row with fewer than four columns or a ballot
    ///   count that is not a non-negative integer
    /// - `Empty` when no data rows follow the header
    ///
    /// # Example
    ///
    /// ```rust
    /// use adapter_manifest::ManifestLoader;
    ///
    /// let csv = "county,scanner,batch,count,location\nAdams,1,1,90,Shelf A\nBoulder,1,1,10,\n";
    /// let manifest = ManifestLoader::from_reader(csv.as_bytes()).unwrap();
    /// assert_eq!(manifest.population().unwrap(), 100);
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Manifest, ManifestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        if !headers
            .iter()
            .zip(MANIFEST_COLUMNS)
            .all(|(found, expected)| found.eq_ignore_ascii_case(expected))
        {
            debug!(header = ?headers, "Non-standard manifest header, reading columns by position");
        }

        let mut batches = Vec::new();
        for record in reader.records() {
            batches.push(parse_row(&record?)?);
        }

        if batches.is_empty() {
            return Err(ManifestError::Empty);
        }
        Ok(Manifest::new(batches))
    }
}

fn parse_row(record: &StringRecord) -> Result<Batch, ManifestError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() < REQUIRED_COLUMNS {
        return Err(ManifestError::InvalidRow {
            line,
            reason: format!(
                "expected at least {} columns, found {}",
                REQUIRED_COLUMNS,
                record.len()
            ),
        });
    }

    let count = &record[3];
    let cardcount = count.parse::<u64>().map_err(|_| ManifestError::InvalidRow {
        line,
        reason: format!("ballot count '{count}' is not a non-negative integer"),
    })?;

    Ok(Batch::new(
        &record[0],
        &record[1],
        &record[2],
        cardcount,
        record.get(4).unwrap_or(""),
    ))
}
