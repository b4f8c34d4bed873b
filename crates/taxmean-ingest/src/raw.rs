//! Raw table extraction.
//!
//! Turns a text DataFrame into a [`RawTable`] with an explicit schema: one key
//! column chosen by position, known metadata columns dropped, and every other
//! column parsed as numeric-or-missing.

use std::path::Path;

use polars::prelude::{Column, DataFrame, DataType};
use tracing::{debug, info_span};

use taxmean_model::{Abundance, RawTable, is_metadata_column};

use crate::csv::{read_table_frame, read_table_headers};
use crate::error::{IngestError, Result};
use crate::values::parse_abundance;

fn clean_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn column_text(column: &Column) -> Result<Vec<Option<String>>> {
    let casted = column.cast(&DataType::String)?;
    let values = casted.str()?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Reads one table file into a [`RawTable`].
pub fn read_raw_table(path: &Path, key_column: usize) -> Result<RawTable> {
    let span = info_span!("read_table", file = %path.display());
    let _guard = span.enter();

    let headers = read_table_headers(path)?;
    let df = read_table_frame(path)?;
    let names = if headers.len() == df.width() {
        headers
    } else {
        df.get_column_names()
            .iter()
            .map(|name| clean_header(name.as_str()))
            .collect()
    };
    raw_table_from_frame(&df, &names, path, key_column)
}

/// Builds a [`RawTable`] from a text DataFrame.
///
/// `names` overrides the DataFrame's own column names (same order and
/// length), which keeps header text exactly as written in the file.
pub fn raw_table_from_frame(
    df: &DataFrame,
    names: &[String],
    path: &Path,
    key_column: usize,
) -> Result<RawTable> {
    let width = df.width();
    if key_column >= width {
        return Err(IngestError::KeyColumnOutOfRange {
            path: path.to_path_buf(),
            index: key_column,
            width,
        });
    }
    if df.height() == 0 {
        return Err(IngestError::NoRows {
            path: path.to_path_buf(),
        });
    }

    let columns = df.get_columns();
    let name_of = |idx: usize| {
        names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| clean_header(columns[idx].name().as_str()))
    };

    let mut keys = Vec::with_capacity(df.height());
    for (row, value) in column_text(&columns[key_column])?.into_iter().enumerate() {
        match value.map(|v| v.trim().to_string()) {
            Some(key) if !key.is_empty() => keys.push(key),
            _ => {
                return Err(IngestError::MissingKey {
                    path: path.to_path_buf(),
                    row: row + 1,
                });
            }
        }
    }

    let mut data_names = Vec::new();
    let mut data_columns = Vec::new();
    let mut dropped = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        if idx == key_column {
            continue;
        }
        let name = name_of(idx);
        if is_metadata_column(&name) {
            dropped.push(name);
            continue;
        }
        let mut parsed = Vec::with_capacity(df.height());
        for (row, value) in column_text(column)?.into_iter().enumerate() {
            let cell = parse_abundance(value.as_deref()).ok_or_else(|| {
                IngestError::NonNumericCell {
                    path: path.to_path_buf(),
                    column: name.clone(),
                    row: row + 1,
                    value: value.clone().unwrap_or_default(),
                }
            })?;
            parsed.push(cell);
        }
        data_names.push(name);
        data_columns.push(parsed);
    }

    if data_columns.is_empty() {
        return Err(IngestError::NoDataColumns {
            path: path.to_path_buf(),
        });
    }
    if !dropped.is_empty() {
        debug!(columns = ?dropped, "dropped metadata columns");
    }

    let cells: Vec<Vec<Abundance>> = (0..keys.len())
        .map(|row| data_columns.iter().map(|column| column[row]).collect())
        .collect();

    RawTable::new(path, name_of(key_column), keys, data_names, cells).map_err(|source| {
        IngestError::Shape {
            path: path.to_path_buf(),
            source,
        }
    })
}
