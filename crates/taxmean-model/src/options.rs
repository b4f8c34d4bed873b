//! Configuration options for a power-mean run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::enums::{LabelAxis, TaxonRank};
use crate::exponent::PowerExponent;

/// Default output file name when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "power_mean.csv";

/// Options controlling label resolution and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Root directory searched recursively for input tables.
    pub data_dir: PathBuf,

    /// Destination of the final table.
    pub output: PathBuf,

    /// Exponent of the power mean.
    pub power: PowerExponent,

    /// Regular expression splitting a label into rank segments.
    pub delimiter_pattern: String,

    /// Regular expression (or plain substring) a file name must match.
    /// `None` matches every file.
    pub file_filter: Option<String>,

    /// Strip `_V<digit>` replicate suffixes from sample names.
    pub strip_replicate_suffix: bool,

    /// Rank that labels are resolved to.
    pub rank: TaxonRank,

    /// Axis carrying the taxonomic labels in the input files.
    pub axis: LabelAxis,

    /// Zero-based position of the key column.
    pub key_column: usize,
}

impl PipelineOptions {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        power: PowerExponent,
        delimiter_pattern: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            power,
            delimiter_pattern: delimiter_pattern.into(),
            file_filter: None,
            strip_replicate_suffix: false,
            rank: TaxonRank::default(),
            axis: LabelAxis::default(),
            key_column: 0,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_file_filter(mut self, filter: Option<String>) -> Self {
        self.file_filter = filter.filter(|f| !f.is_empty());
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: TaxonRank) -> Self {
        self.rank = rank;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: LabelAxis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_replicate_suffix_stripping(mut self, enable: bool) -> Self {
        self.strip_replicate_suffix = enable;
        self
    }

    #[must_use]
    pub fn with_key_column(mut self, index: usize) -> Self {
        self.key_column = index;
        self
    }
}
