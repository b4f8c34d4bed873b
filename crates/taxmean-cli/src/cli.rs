//! CLI argument definitions for taxmean.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use taxmean_model::{DEFAULT_OUTPUT_FILE, LabelAxis, PipelineOptions, PowerExponent, TaxonRank};

#[derive(Parser)]
#[command(
    name = "taxmean",
    version,
    about = "Aggregate taxonomic abundance tables with a generalized power mean",
    long_about = "Aggregate taxonomic abundance tables with a generalized power mean.\n\n\
                  Labels are resolved to a single taxonomic rank, duplicate taxa are\n\
                  summed per file, and the per-file tables are reduced per taxon and\n\
                  sample into one CSV table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the power-mean table from a folder of abundance tables.
    Run(RunArgs),

    /// List the supported taxonomic ranks.
    Ranks,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder searched recursively for input tables.
    #[arg(short = 'd', long = "data", value_name = "DIR")]
    pub data: PathBuf,

    /// Exponent of the power mean: an integer, or `inf` for the maximum.
    #[arg(
        short = 'p',
        long = "power",
        value_name = "INT|inf",
        allow_negative_numbers = true
    )]
    pub power: PowerExponent,

    /// Regular expression separating the ranks of a label (e.g. ";").
    #[arg(short = 'r', long = "regex", value_name = "PATTERN")]
    pub regex: String,

    /// Output CSV path.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Only read files whose name matches this pattern.
    #[arg(short = 'f', long = "file-id", value_name = "PATTERN")]
    pub file_id: Option<String>,

    /// Strip `_V<digit>` replicate suffixes from sample names.
    #[arg(short = 'e', long = "extra-clean")]
    pub extra_clean: bool,

    /// Rank to resolve labels to (full name or first letter).
    #[arg(short = 'l', long = "level", value_name = "RANK", default_value_t = TaxonRank::Genus)]
    pub level: TaxonRank,

    /// Labels are column headers instead of the key column.
    #[arg(short = 't', long = "transpose")]
    pub transpose: bool,

    /// Zero-based position of the key column.
    #[arg(short = 'k', long = "key-column", value_name = "INDEX", default_value_t = 0)]
    pub key_column: usize,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Compute and report without writing the output table.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn to_options(&self) -> PipelineOptions {
        PipelineOptions::new(&self.data, self.power, &self.regex)
            .with_output(&self.output)
            .with_file_filter(self.file_id.clone())
            .with_rank(self.level)
            .with_axis(LabelAxis::from_transpose(self.transpose))
            .with_replicate_suffix_stripping(self.extra_clean)
            .with_key_column(self.key_column)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
