//! Delimited text reading into Polars DataFrames.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads the header line, without a UTF-8 BOM.
fn read_header_line(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(open(path)?);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).trim_end();
    if read == 0 || cleaned.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(cleaned.to_string())
}

/// Picks tab when the header has tabs and no commas, comma otherwise.
pub fn detect_separator(header_line: &str) -> u8 {
    let tabs = header_line.matches('\t').count();
    let commas = header_line.matches(',').count();
    if tabs > commas { b'\t' } else { b',' }
}

/// Reads the header fields of a table file.
pub fn read_table_headers(path: &Path) -> Result<Vec<String>> {
    let line = read_header_line(path)?;
    let separator = detect_separator(&line);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .from_reader(line.as_bytes());
    let record = reader
        .records()
        .next()
        .transpose()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .ok_or_else(|| IngestError::EmptyCsv {
            path: path.to_path_buf(),
        })?;
    Ok(record.iter().map(|field| field.trim().to_string()).collect())
}

/// Reads a table file into a DataFrame with every column as text.
///
/// Cell typing happens afterwards with an explicit numeric-or-missing
/// schema, so Polars schema inference is disabled.
pub fn read_table_frame(path: &Path) -> Result<DataFrame> {
    let separator = detect_separator(&read_header_line(path)?);

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
