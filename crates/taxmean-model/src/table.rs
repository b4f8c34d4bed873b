//! Table types passed between pipeline stages.
//!
//! Every stage owns its table exclusively: a [`RawTable`] is consumed by the
//! normalizer, the resulting [`NormalizedTable`]s are consumed by the merger,
//! and the [`MergedTable`] is consumed by the reducer which produces the
//! [`FinalTable`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::abundance::Abundance;
use crate::error::TableError;

/// Label used for taxa that do not resolve at the requested rank.
pub const UNRESOLVED_LABEL: &str = "Unresolved";

/// Name of the index column in the final table.
pub const TAXONOMY_INDEX_LABEL: &str = "taxonomy";

/// Metadata columns that appear in some exports and carry no abundance data.
pub const KNOWN_METADATA_COLUMNS: [&str; 4] = ["even_stag", "run", "in_out", "v_region"];

/// Returns true if the column is a known metadata column to drop on ingest.
pub fn is_metadata_column(name: &str) -> bool {
    KNOWN_METADATA_COLUMNS.contains(&name.trim())
}

fn check_grid(cells: &[Vec<Abundance>], rows: usize, width: usize) -> Result<(), TableError> {
    if cells.len() != rows {
        return Err(TableError::RowCount {
            expected: rows,
            actual: cells.len(),
        });
    }
    for (row, values) in cells.iter().enumerate() {
        if values.len() != width {
            return Err(TableError::RowWidth {
                row,
                expected: width,
                actual: values.len(),
            });
        }
    }
    Ok(())
}

/// One source file after parsing, before any label is touched.
///
/// `keys` holds the key-column values (one per row) and `columns` the
/// data-column headers; `cells[row][column]` is the parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub source: PathBuf,
    pub key_name: String,
    pub keys: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<Abundance>>,
}

impl RawTable {
    pub fn new(
        source: impl Into<PathBuf>,
        key_name: impl Into<String>,
        keys: Vec<String>,
        columns: Vec<String>,
        cells: Vec<Vec<Abundance>>,
    ) -> Result<Self, TableError> {
        check_grid(&cells, keys.len(), columns.len())?;
        Ok(Self {
            source: source.into(),
            key_name: key_name.into(),
            keys,
            columns,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.keys.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// File name of the source, for log and error context.
    pub fn source_name(&self) -> String {
        source_name(&self.source)
    }
}

pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// A grid oriented with taxa as rows and samples as columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxonTable {
    pub taxa: Vec<String>,
    pub samples: Vec<String>,
    pub cells: Vec<Vec<Abundance>>,
}

impl TaxonTable {
    pub fn new(
        taxa: Vec<String>,
        samples: Vec<String>,
        cells: Vec<Vec<Abundance>>,
    ) -> Result<Self, TableError> {
        check_grid(&cells, taxa.len(), samples.len())?;
        Ok(Self {
            taxa,
            samples,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.taxa.len()
    }

    pub fn width(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    pub fn taxon_index(&self, taxon: &str) -> Option<usize> {
        self.taxa.iter().position(|t| t == taxon)
    }

    pub fn sample_index(&self, sample: &str) -> Option<usize> {
        self.samples.iter().position(|s| s == sample)
    }

    /// Looks up a cell by taxon and sample name.
    pub fn get(&self, taxon: &str, sample: &str) -> Option<Abundance> {
        let row = self.taxon_index(taxon)?;
        let col = self.sample_index(sample)?;
        Some(self.cells[row][col])
    }

    /// Values of one taxon across all samples.
    pub fn row(&self, taxon: &str) -> Option<&[Abundance]> {
        self.taxon_index(taxon).map(|idx| self.cells[idx].as_slice())
    }

    pub fn missing_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_missing())
            .count()
    }
}

/// One file's table after label resolution and deduplication.
///
/// Taxa are unique within `table`. Sample names may repeat when replicate
/// suffixes were stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub source: PathBuf,
    pub table: TaxonTable,
    /// Entries on the labeled axis before deduplication.
    pub raw_entries: usize,
    /// Entries that resolved to [`UNRESOLVED_LABEL`].
    pub unresolved_entries: usize,
}

impl NormalizedTable {
    pub fn source_name(&self) -> String {
        source_name(&self.source)
    }
}

/// One stacked entry of the merged table.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub taxon: String,
    /// Index of the contributing table in merge order.
    pub source: usize,
    /// Cells aligned with [`MergedTable::samples`].
    pub cells: Vec<Abundance>,
}

/// All normalized tables stacked over the union of their samples.
///
/// Not deduplicated: the same taxon appears once per contributing table (and
/// once per replicate column when sample names repeat within a table).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedTable {
    pub samples: Vec<String>,
    pub rows: Vec<MergedRow>,
    pub sources: Vec<PathBuf>,
}

impl MergedTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.samples.len()
    }
}

/// A taxon/sample pair with no present value in any contributing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCell {
    pub taxon: String,
    pub sample: String,
}

/// Result of the power-mean reduction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalTable {
    pub table: TaxonTable,
    /// Cells that came out missing because their group had no present values.
    pub missing: Vec<MissingCell>,
}

impl FinalTable {
    pub fn index_label(&self) -> &'static str {
        TAXONOMY_INDEX_LABEL
    }
}
