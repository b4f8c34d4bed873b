//! Run summary tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunSummary;

/// Missing cells listed individually before the rest are elided.
const MISSING_PREVIEW: usize = 20;

pub fn print_summary(summary: &RunSummary) {
    println!("Data: {}", summary.options.data_dir.display());
    match &summary.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    println!(
        "Rank: {}  Power: {}  Delimiter: {}",
        summary.options.rank, summary.options.power, summary.options.delimiter_pattern
    );
    println!("{}", file_table(summary));
    if let Some(table) = missing_table(summary) {
        println!();
        println!("Missing cells:");
        println!("{table}");
    }
}

/// One row per input file followed by a totals row.
pub fn file_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Entries"),
        header_cell("Taxa"),
        header_cell("Unresolved"),
        header_cell("Samples"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for file in &summary.files {
        table.add_row(vec![
            Cell::new(&file.file).fg(Color::Blue),
            Cell::new(file.entries),
            Cell::new(file.taxa),
            count_cell(file.unresolved, Color::Yellow),
            Cell::new(file.samples),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_entries()).add_attribute(Attribute::Bold),
        Cell::new(summary.taxa).add_attribute(Attribute::Bold),
        count_cell(summary.total_unresolved(), Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(summary.samples).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Taxon/sample pairs left without a value; `None` when there are none.
pub fn missing_table(summary: &RunSummary) -> Option<Table> {
    if summary.missing.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Taxon"), header_cell("Sample")]);
    apply_table_style(&mut table);
    for cell in summary.missing.iter().take(MISSING_PREVIEW) {
        table.add_row(vec![Cell::new(&cell.taxon), Cell::new(&cell.sample)]);
    }
    let hidden = summary.missing.len().saturating_sub(MISSING_PREVIEW);
    if hidden > 0 {
        table.add_row(vec![dim_cell(format!("... {hidden} more")), dim_cell("")]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
