//! Error types for table export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the final table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
