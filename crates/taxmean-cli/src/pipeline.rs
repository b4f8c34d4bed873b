//! Power-mean pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Configure**: Compile the delimiter and file filter patterns (no I/O)
//! 2. **Discover**: Find matching input tables under the data directory
//! 3. **Normalize**: Read each table and fold labels to the target rank
//! 4. **Merge**: Stack the normalized tables over the union of samples
//! 5. **Reduce**: Power mean per taxon and sample
//! 6. **Output**: Write the final table (skipped on a dry run)

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use taxmean_ingest::{FileFilter, discover_input_files, read_raw_table};
use taxmean_model::{FinalTable, NormalizedTable, PipelineOptions, PowerExponent};
use taxmean_output::write_final_table;
use taxmean_transform::{LabelResolver, NormalizeOptions, merge, normalize, reduce};

use crate::types::{FileSummary, RunResult, RunSummary};

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Stage 1: Configure
// ============================================================================

/// Compiled settings derived from [`PipelineOptions`].
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub resolver: LabelResolver,
    pub filter: FileFilter,
    pub normalize: NormalizeOptions,
}

/// Validates options and compiles patterns before any file is touched.
pub fn prepare(options: &PipelineOptions) -> Result<PreparedRun> {
    let resolver = LabelResolver::new(&options.delimiter_pattern, options.rank)
        .context("invalid delimiter pattern")?;
    let filter =
        FileFilter::new(options.file_filter.as_deref()).context("invalid file filter")?;
    Ok(PreparedRun {
        resolver,
        filter,
        normalize: NormalizeOptions {
            axis: options.axis,
            strip_replicate_suffix: options.strip_replicate_suffix,
        },
    })
}

// ============================================================================
// Stage 2: Discover
// ============================================================================

/// Lists the input tables, never including the configured output file.
pub fn discover(options: &PipelineOptions, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let files = discover_input_files(
        &options.data_dir,
        filter,
        std::slice::from_ref(&options.output),
    )
    .with_context(|| format!("discover tables in {}", options.data_dir.display()))?;
    Ok(files)
}

// ============================================================================
// Stage 3: Normalize
// ============================================================================

/// Reads and normalizes one table.
pub fn load_table(
    path: &Path,
    prepared: &PreparedRun,
    key_column: usize,
) -> Result<NormalizedTable> {
    let raw = read_raw_table(path, key_column)
        .with_context(|| format!("read {}", path.display()))?;
    let normalized = normalize(raw, &prepared.resolver, prepared.normalize)
        .with_context(|| format!("normalize {}", path.display()))?;
    Ok(normalized)
}

fn file_summary(table: &NormalizedTable) -> FileSummary {
    FileSummary {
        file: table.source_name(),
        path: table.source.clone(),
        entries: table.raw_entries,
        taxa: table.table.height(),
        unresolved: table.unresolved_entries,
        samples: table.table.width(),
    }
}

/// Reads every table, stopping at the first malformed one.
pub fn load_tables(
    files: &[PathBuf],
    prepared: &PreparedRun,
    key_column: usize,
) -> Result<(Vec<NormalizedTable>, Vec<FileSummary>)> {
    let mut tables = Vec::with_capacity(files.len());
    let mut summaries = Vec::with_capacity(files.len());
    for path in files {
        let start = Instant::now();
        let table = load_table(path, prepared, key_column)?;
        let summary = file_summary(&table);
        info!(
            file = %summary.file,
            entries = summary.entries,
            taxa = summary.taxa,
            unresolved = summary.unresolved,
            duration_ms = elapsed_ms(start),
            "normalized file"
        );
        summaries.push(summary);
        tables.push(table);
    }
    Ok((tables, summaries))
}

// ============================================================================
// Stage 4-5: Merge and Reduce
// ============================================================================

/// Merges normalized tables and reduces them with the given exponent.
pub fn aggregate(tables: Vec<NormalizedTable>, power: PowerExponent) -> Result<FinalTable> {
    let merged = merge(tables).context("merge tables")?;
    info!(
        rows = merged.height(),
        samples = merged.width(),
        "merge complete"
    );
    let result = reduce(&merged, power).context("reduce merged table")?;
    Ok(result)
}

// ============================================================================
// Full run
// ============================================================================

/// Runs every stage. With `dry_run` the final table is computed but not
/// written.
pub fn run(options: &PipelineOptions, dry_run: bool) -> Result<RunResult> {
    let run_start = Instant::now();
    let prepared = prepare(options)?;

    let discover_span = info_span!("discover", data_dir = %options.data_dir.display());
    let files = discover_span.in_scope(|| discover(options, &prepared.filter))?;
    info!(
        file_count = files.len(),
        filter = %prepared.filter.describe(),
        "discovery complete"
    );

    let normalize_span = info_span!(
        "normalize",
        rank = %options.rank,
        axis = %options.axis
    );
    let normalize_start = Instant::now();
    let (tables, file_summaries) =
        normalize_span.in_scope(|| load_tables(&files, &prepared, options.key_column))?;
    info!(
        file_count = tables.len(),
        duration_ms = elapsed_ms(normalize_start),
        "normalize complete"
    );

    let reduce_span = info_span!("reduce", power = %options.power);
    let reduce_start = Instant::now();
    let table = reduce_span.in_scope(|| aggregate(tables, options.power))?;
    info!(
        taxa = table.table.height(),
        samples = table.table.width(),
        missing_cells = table.missing.len(),
        duration_ms = elapsed_ms(reduce_start),
        "reduce complete"
    );

    let output = if dry_run {
        info!("dry run: final table not written");
        None
    } else {
        let output_span = info_span!("output", path = %options.output.display());
        output_span.in_scope(|| write_final_table(&options.output, &table))
            .with_context(|| format!("write {}", options.output.display()))?;
        Some(options.output.clone())
    };

    let summary = RunSummary {
        options: options.clone(),
        files: file_summaries,
        taxa: table.table.height(),
        samples: table.table.width(),
        missing_cells: table.missing.len(),
        missing: table.missing.clone(),
        output,
        duration_ms: elapsed_ms(run_start),
    };
    Ok(RunResult { summary, table })
}
