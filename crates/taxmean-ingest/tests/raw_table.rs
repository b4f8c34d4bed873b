//! Tests for raw table extraction.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use taxmean_ingest::{IngestError, read_raw_table};
use taxmean_model::Abundance;

fn write_table(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write table");
    path
}

#[test]
fn reads_keys_columns_and_cells() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(
        &dir,
        "sample.csv",
        "index,S1,S2\nk__A;p__B,3,5\nk__A;p__C,,NA\n",
    );

    let table = read_raw_table(&path, 0).expect("read table");
    assert_eq!(table.key_name, "index");
    assert_eq!(table.keys, vec!["k__A;p__B", "k__A;p__C"]);
    assert_eq!(table.columns, vec!["S1", "S2"]);
    assert_eq!(
        table.cells,
        vec![
            vec![Abundance::Present(3.0), Abundance::Present(5.0)],
            vec![Abundance::Missing, Abundance::Missing],
        ]
    );
    assert_eq!(table.source_name(), "sample.csv");
}

#[test]
fn drops_known_metadata_columns() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(
        &dir,
        "sample.csv",
        "index,run,k__A;p__B,in_out,v_region,even_stag\nS1,r1,4,in,V4,x\n",
    );

    let table = read_raw_table(&path, 0).expect("read table");
    assert_eq!(table.columns, vec!["k__A;p__B"]);
    assert_eq!(table.cells, vec![vec![Abundance::Present(4.0)]]);
}

#[test]
fn honors_key_column_offset_and_tabs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(&dir, "sample.tsv", "S1\ttaxon\tS2\n1\tk__A\t2\n");

    let table = read_raw_table(&path, 1).expect("read table");
    assert_eq!(table.key_name, "taxon");
    assert_eq!(table.keys, vec!["k__A"]);
    assert_eq!(table.columns, vec!["S1", "S2"]);
}

#[test]
fn key_column_out_of_range_is_malformed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(&dir, "sample.csv", "index,S1\nk__A,1\n");

    let err = read_raw_table(&path, 5).unwrap_err();
    assert!(matches!(
        err,
        IngestError::KeyColumnOutOfRange {
            index: 5,
            width: 2,
            ..
        }
    ));
}

#[test]
fn table_without_data_columns_is_malformed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(&dir, "sample.csv", "index,run\nk__A,r1\n");

    let err = read_raw_table(&path, 0).unwrap_err();
    assert!(matches!(err, IngestError::NoDataColumns { .. }));
}

#[test]
fn non_numeric_cell_reports_context() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(&dir, "sample.csv", "index,S1\nk__A,1\nk__B,lots\n");

    let err = read_raw_table(&path, 0).unwrap_err();
    match err {
        IngestError::NonNumericCell {
            column, row, value, ..
        } => {
            assert_eq!(column, "S1");
            assert_eq!(row, 2);
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_table(&dir, "sample.csv", "index,S1\n");

    let err = read_raw_table(&path, 0).unwrap_err();
    assert!(matches!(err, IngestError::NoRows { .. }));
}
