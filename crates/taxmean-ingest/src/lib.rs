//! Abundance table ingestion.
//!
//! This crate finds input tables on disk and loads them into explicitly typed
//! [`taxmean_model::RawTable`]s.
//!
//! # Features
//!
//! - **Discovery**: Recursive search for `.csv`/`.tsv`/`.txt` files selected by a name filter
//! - **Reading**: Comma or tab separated text loaded through Polars
//! - **Typing**: Fixed key column, metadata columns dropped, numeric-or-missing cells
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use taxmean_ingest::{FileFilter, discover_input_files, read_raw_table};
//!
//! let filter = FileFilter::new(Some("Silva"))?;
//! for path in discover_input_files(Path::new("data"), &filter, &[])? {
//!     let table = read_raw_table(&path, 0)?;
//! }
//! ```

mod csv;
mod discovery;
mod error;
mod raw;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{FileFilter, TABLE_EXTENSIONS, discover_input_files};

// === Reading ===
pub use crate::csv::{detect_separator, read_table_frame, read_table_headers};
pub use raw::{raw_table_from_frame, read_raw_table};
pub use values::{MISSING_TOKENS, is_missing_token, parse_abundance};
