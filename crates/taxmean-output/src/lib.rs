//! Output of the power-mean table.
//!
//! The final table is converted to a Polars `DataFrame` and written as CSV
//! with a leading `taxonomy` column. Missing cells are written empty.

mod csv;
pub mod error;

pub use crate::csv::{final_table_to_frame, render_csv, write_final_table};
pub use error::{OutputError, Result};
