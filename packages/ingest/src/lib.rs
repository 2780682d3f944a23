#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV ingestion of mining conflict case records.
//!
//! Reads a header-bearing CSV export of the conflict report into
//! [`ConflictCase`] values. Blank coordinate cells become `None`; a
//! coordinate cell that is present but not a number fails the whole read
//! with the offending row's position.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use conflict_map_conflict_models::ConflictCase;
use conflict_map_hotspot_models::IncidentPoint;

/// Errors that can occur while reading case records.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A row could not be parsed into a case record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Options for reading a case export.
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Field delimiter (default: comma).
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Reads every case from `reader`, in file order.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] if the header is unreadable or any row
/// fails to deserialize.
pub fn read_cases<R: Read>(
    reader: R,
    options: CsvOptions,
) -> Result<Vec<ConflictCase>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut cases = Vec::new();
    for record in csv_reader.deserialize::<ConflictCase>() {
        cases.push(record?);
    }

    let with_coords = cases
        .iter()
        .filter(|c| c.latitude.is_some() && c.longitude.is_some())
        .count();
    log::info!("Read {} cases ({with_coords} with coordinates)", cases.len());

    Ok(cases)
}

/// Reads every case from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be opened, or
/// [`IngestError::Csv`] if parsing fails.
pub fn read_cases_from_path(
    path: &Path,
    options: CsvOptions,
) -> Result<Vec<ConflictCase>, IngestError> {
    log::info!("Reading cases from {}", path.display());

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    read_cases(file, options)
}

/// Converts cases into incident points for hotspot detection.
#[must_use]
pub fn incident_points(cases: &[ConflictCase]) -> Vec<IncidentPoint> {
    cases.iter().map(ConflictCase::incident_point).collect()
}
