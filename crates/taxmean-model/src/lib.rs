pub mod abundance;
pub mod enums;
pub mod error;
pub mod exponent;
pub mod options;
pub mod table;

pub use abundance::Abundance;
pub use enums::{LabelAxis, TaxonRank};
pub use error::{ConfigError, Result, TableError};
pub use exponent::PowerExponent;
pub use options::{DEFAULT_OUTPUT_FILE, PipelineOptions};
pub use table::{
    FinalTable, KNOWN_METADATA_COLUMNS, MergedRow, MergedTable, MissingCell, NormalizedTable,
    RawTable, TAXONOMY_INDEX_LABEL, TaxonTable, UNRESOLVED_LABEL, is_metadata_column,
};
