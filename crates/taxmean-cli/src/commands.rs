use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use taxmean_cli::pipeline;
use taxmean_cli::summary::{apply_table_style, header_cell};
use taxmean_cli::types::{RunResult, RunSummary};
use taxmean_model::TaxonRank;

use crate::cli::RunArgs;

pub fn run_ranks() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Prefix"),
        header_cell("Segments"),
    ]);
    apply_table_style(&mut table);
    for rank in TaxonRank::ALL {
        table.add_row(vec![
            Cell::new(rank.as_str()),
            Cell::new(rank.placeholder()),
            Cell::new(rank.segment_count()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_power_mean(args: &RunArgs) -> Result<RunResult> {
    let options = args.to_options();
    let run_span = info_span!("run", data_dir = %options.data_dir.display());
    let _run_guard = run_span.enter();

    let result = pipeline::run(&options, args.dry_run)?;
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &result.summary)?;
        info!(path = %path.display(), "wrote summary json");
    }
    Ok(result)
}

fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
