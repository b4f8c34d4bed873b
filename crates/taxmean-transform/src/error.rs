use thiserror::Error;

use taxmean_model::TableError;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("no matching input files found")]
    NoTables,

    #[error("inconsistent table shape for {source_name}: {source}")]
    Shape {
        source_name: String,
        #[source]
        source: TableError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
