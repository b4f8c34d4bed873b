//! CSV export of the final power-mean table.

use std::fs;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::{debug, info};

use taxmean_model::FinalTable;

use crate::error::{OutputError, Result};

/// Builds a DataFrame with a leading `taxonomy` column and one nullable
/// Float64 column per sample. Missing cells become nulls.
pub fn final_table_to_frame(result: &FinalTable) -> Result<DataFrame> {
    let table = &result.table;
    let mut columns: Vec<Column> = Vec::with_capacity(table.width() + 1);
    columns.push(Column::new(
        result.index_label().into(),
        table.taxa.iter().map(String::as_str).collect::<Vec<_>>(),
    ));
    for (col, sample) in table.samples.iter().enumerate() {
        let values: Vec<Option<f64>> = table.cells.iter().map(|row| row[col].value()).collect();
        columns.push(Series::new(sample.as_str().into(), values).into_column());
    }
    Ok(DataFrame::new(columns)?)
}

/// Renders the final table as comma-separated text with a header line.
pub fn render_csv(result: &FinalTable) -> Result<String> {
    let mut df = final_table_to_frame(result)?;
    let mut buffer: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;
    String::from_utf8(buffer).map_err(|e| OutputError::DataFrame {
        message: e.to_string(),
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes the final table to `path`.
///
/// The table is rendered in memory first, so a rendering failure leaves no
/// partial file behind.
pub fn write_final_table(path: &Path, result: &FinalTable) -> Result<()> {
    let text = render_csv(result)?;
    ensure_parent_dir(path)?;
    fs::write(path, text.as_bytes()).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = text.len(), "rendered final table");
    info!(
        path = %path.display(),
        taxa = result.table.height(),
        samples = result.table.width(),
        "wrote power-mean table"
    );
    Ok(())
}
