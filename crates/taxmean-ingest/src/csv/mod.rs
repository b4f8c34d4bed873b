//! Delimited text reading.

mod reader;

pub use reader::{detect_separator, read_table_frame, read_table_headers};
