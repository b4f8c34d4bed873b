//! Error types for abundance table ingestion.

use std::path::PathBuf;
use thiserror::Error;

use taxmean_model::TableError;

/// Errors that can occur during ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// Data directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file filter did not select any table.
    #[error("no matching input files found in {path} (filter: {filter})")]
    NoMatchingFiles { path: PathBuf, filter: String },

    // === File Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse delimited text with Polars.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File has no header line.
    #[error("table file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Malformed Table Errors ===
    /// The configured key column does not exist.
    #[error("key column {index} out of range in {path} ({width} columns)")]
    KeyColumnOutOfRange {
        path: PathBuf,
        index: usize,
        width: usize,
    },

    /// No data rows below the header.
    #[error("no rows in {path}")]
    NoRows { path: PathBuf },

    /// Only the key column (and metadata columns) are present.
    #[error("no data columns in {path}")]
    NoDataColumns { path: PathBuf },

    /// A key-column cell is empty.
    #[error("empty key in {path} at row {row}")]
    MissingKey { path: PathBuf, row: usize },

    /// A data cell is neither numeric nor a missing-value token.
    #[error("non-numeric value '{value}' in {path}, column '{column}', row {row}")]
    NonNumericCell {
        path: PathBuf,
        column: String,
        row: usize,
        value: String,
    },

    /// Parsed cells do not line up with the labels.
    #[error("inconsistent table shape in {path}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
