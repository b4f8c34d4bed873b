use thiserror::Error;

/// Invalid run configuration, detected before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid exponent '{value}': must be an integer or 'inf'")]
    InvalidExponent { value: String },

    #[error(
        "unknown taxonomic rank '{value}': expected one of kingdom, phylum, class, order, family, genus, species"
    )]
    UnknownRank { value: String },

    #[error("invalid {option} pattern '{pattern}': {message}")]
    InvalidPattern {
        option: &'static str,
        pattern: String,
        message: String,
    },

    #[error("missing required option: {option}")]
    MissingOption { option: &'static str },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A table whose cell grid does not match its labels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("expected {expected} rows of cells, found {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
