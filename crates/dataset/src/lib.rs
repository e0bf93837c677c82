//! Dataset layer for harvest-dash.
//!
//! **Philosophy:** the dataset is a write-once, read-many artifact. The
//! synthesizer writes it as a delimited text file; the dashboard loads it
//! once at startup and only ever reads it afterwards.
//!
//! - [`schema`] - Column names, date format, and per-field rounding
//! - [`writer`] - CSV serialization (byte-stable for a fixed series)
//! - [`loader`] - CSV loading with date validation and row diagnostics
//!
//! Loading derives the month and quarter buckets once per record, so
//! filtering and grouping never re-parse dates.

pub mod loader;
pub mod schema;
pub mod writer;

pub use loader::{BucketedRecord, Dataset, RowDiagnostic, load_from_path, load_from_reader};
pub use schema::{DATE_FORMAT, HEADER};
pub use writer::{write_records, write_records_to_path};

/// Errors from reading or writing the dataset artifact.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level failure (malformed file, flush error).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file's header row is missing an expected column.
    #[error("missing column {0:?} in dataset header")]
    MissingColumn(&'static str),
}
