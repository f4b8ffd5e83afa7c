//! I/O error types for asterism-io.

use std::path::PathBuf;

use asterism_match::MatchError;
use asterism_shape::ShapeError;

/// Errors from file I/O, catalog and drawing parsing, and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a catalog file is not valid JSON in any accepted encoding.
    #[error("invalid catalog JSON in {path}")]
    JsonParse {
        /// Path to the catalog file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when the drawing CSV header lacks a required column.
    #[error("missing column \"{column}\" in {path}")]
    MissingColumn {
        /// Path to the CSV file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a coordinate cell is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value in {path}: row {row_index}, column \"{column}\", raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Name of the offending column.
        column: &'static str,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when a catalog entry cannot be constructed, e.g. an empty name.
    #[error("invalid catalog entry {index} in {path}")]
    InvalidEntry {
        /// Path to the catalog file.
        path: PathBuf,
        /// Zero-based position of the entry.
        index: usize,
        /// Underlying validation error.
        source: MatchError,
    },

    /// Returned when a catalog entry has neither `stars` nor `lines`.
    #[error("catalog entry {index} (\"{name}\") in {path} has no stars or lines")]
    MissingStars {
        /// Path to the catalog file.
        path: PathBuf,
        /// Zero-based position of the entry.
        index: usize,
        /// Name of the entry.
        name: String,
    },

    /// Returned when the points of a catalog entry or drawing are rejected.
    #[error("invalid points for item {index} in {path}")]
    InvalidPoints {
        /// Path to the source file.
        path: PathBuf,
        /// Zero-based position of the entry or drawing.
        index: usize,
        /// Underlying validation error.
        source: ShapeError,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result artifact cannot be encoded as JSON.
    #[error("cannot encode result for {path}")]
    EncodeJson {
        /// Path the artifact was meant for.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
