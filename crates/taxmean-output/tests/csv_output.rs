//! CSV export of the final table.

use std::fs;

use tempfile::TempDir;

use taxmean_model::{Abundance, FinalTable, MissingCell, TaxonTable};
use taxmean_output::{final_table_to_frame, render_csv, write_final_table};

fn sample_result() -> FinalTable {
    let table = TaxonTable::new(
        vec!["B".into(), "C".into()],
        vec!["S1".into(), "S2".into()],
        vec![
            vec![Abundance::Present(2.5), Abundance::Present(4.0)],
            vec![Abundance::Present(3.0), Abundance::Missing],
        ],
    )
    .unwrap();
    FinalTable {
        table,
        missing: vec![MissingCell {
            taxon: "C".into(),
            sample: "S2".into(),
        }],
    }
}

fn parse_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[test]
fn frame_has_taxonomy_column_and_nullable_samples() {
    let df = final_table_to_frame(&sample_result()).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["taxonomy", "S1", "S2"]);
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("S2").unwrap().null_count(), 1);
}

#[test]
fn missing_cells_are_written_empty() {
    let text = render_csv(&sample_result()).unwrap();
    let rows = parse_rows(&text);

    assert_eq!(rows[0], vec!["taxonomy", "S1", "S2"]);
    assert_eq!(rows[1][0], "B");
    assert_eq!(rows[1][1].parse::<f64>().unwrap(), 2.5);
    assert_eq!(rows[1][2].parse::<f64>().unwrap(), 4.0);
    assert_eq!(rows[2][0], "C");
    assert_eq!(rows[2][1].parse::<f64>().unwrap(), 3.0);
    assert_eq!(rows[2][2], "");
}

#[test]
fn writes_file_and_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("power_mean.csv");

    write_final_table(&path, &sample_result()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_csv(&sample_result()).unwrap());
}

#[test]
fn empty_table_writes_header_only() {
    let text = render_csv(&FinalTable::default()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @"taxonomy");
}
