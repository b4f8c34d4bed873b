//! Result types of a pipeline run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use taxmean_model::{FinalTable, MissingCell, PipelineOptions};

/// Per-file counts gathered during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file: String,
    pub path: PathBuf,
    /// Labeled entries read from the file.
    pub entries: usize,
    /// Distinct taxa after normalization.
    pub taxa: usize,
    /// Entries that resolved to `Unresolved`.
    pub unresolved: usize,
    pub samples: usize,
}

/// Summary of a whole run, printed as a table and optionally written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub options: PipelineOptions,
    pub files: Vec<FileSummary>,
    pub taxa: usize,
    pub samples: usize,
    pub missing_cells: usize,
    pub missing: Vec<MissingCell>,
    /// Written table; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn total_entries(&self) -> usize {
        self.files.iter().map(|file| file.entries).sum()
    }

    pub fn total_unresolved(&self) -> usize {
        self.files.iter().map(|file| file.unresolved).sum()
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub summary: RunSummary,
    pub table: FinalTable,
}
