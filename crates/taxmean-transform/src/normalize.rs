//! Per-file table normalization.
//!
//! Resolves every label on the labeled axis, folds entries that resolve to
//! the same taxon into one by element-wise summation, and returns the table
//! with taxa as rows regardless of the input orientation.

use std::collections::HashMap;

use tracing::debug;

use taxmean_model::{
    Abundance, LabelAxis, NormalizedTable, RawTable, TaxonTable, UNRESOLVED_LABEL,
};

use crate::error::{Result, TransformError};
use crate::label::LabelResolver;
use crate::replicate::strip_replicate_suffix;

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Axis carrying the taxonomic labels.
    pub axis: LabelAxis,
    /// Strip `_V<digit>` replicate suffixes from sample names.
    pub strip_replicate_suffix: bool,
}

fn transpose(cells: &[Vec<Abundance>], width: usize) -> Vec<Vec<Abundance>> {
    (0..width)
        .map(|col| cells.iter().map(|row| row[col]).collect())
        .collect()
}

/// Normalizes one raw table.
pub fn normalize(
    table: RawTable,
    resolver: &LabelResolver,
    options: NormalizeOptions,
) -> Result<NormalizedTable> {
    let source_name = table.source_name();
    let RawTable {
        source,
        keys,
        columns,
        cells,
        ..
    } = table;

    // Orient taxa-as-rows before grouping.
    let (labels, samples, rows) = match options.axis {
        LabelAxis::Rows => (keys, columns, cells),
        LabelAxis::Columns => {
            let rows = transpose(&cells, columns.len());
            (columns, keys, rows)
        }
    };

    let raw_entries = labels.len();
    let mut unresolved_entries = 0usize;
    let mut taxa: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summed: Vec<Vec<Abundance>> = Vec::new();

    for (label, row) in labels.iter().zip(rows) {
        let taxon = resolver.resolve(label);
        if taxon == UNRESOLVED_LABEL {
            unresolved_entries += 1;
        }
        match index.get(&taxon) {
            Some(&slot) => {
                for (acc, cell) in summed[slot].iter_mut().zip(row) {
                    *acc = acc.accumulate(cell);
                }
            }
            None => {
                index.insert(taxon.clone(), taxa.len());
                taxa.push(taxon);
                summed.push(row);
            }
        }
    }

    let samples: Vec<String> = if options.strip_replicate_suffix {
        samples
            .iter()
            .map(|name| strip_replicate_suffix(name).to_string())
            .collect()
    } else {
        samples
    };

    debug!(
        file = %source_name,
        raw_entries,
        taxa = taxa.len(),
        unresolved_entries,
        samples = samples.len(),
        "normalized table"
    );

    let table = TaxonTable::new(taxa, samples, summed)
        .map_err(|source| TransformError::Shape {
            source_name,
            source,
        })?;

    Ok(NormalizedTable {
        source,
        table,
        raw_entries,
        unresolved_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxmean_model::TaxonRank;

    fn present(values: &[f64]) -> Vec<Abundance> {
        values.iter().copied().map(Abundance::Present).collect()
    }

    fn raw(keys: &[&str], columns: &[&str], cells: Vec<Vec<Abundance>>) -> RawTable {
        RawTable::new(
            "sample.csv",
            "index",
            keys.iter().map(|s| s.to_string()).collect(),
            columns.iter().map(|s| s.to_string()).collect(),
            cells,
        )
        .unwrap()
    }

    #[test]
    fn sums_rows_that_resolve_to_the_same_taxon() {
        let resolver = LabelResolver::new(";", TaxonRank::Phylum).unwrap();
        let table = raw(
            &["k__A;p__B", "k__A;p__B"],
            &["S1", "S2"],
            vec![present(&[3.0, 5.0]), present(&[2.0, 1.0])],
        );

        let normalized = normalize(table, &resolver, NormalizeOptions::default()).unwrap();
        assert_eq!(normalized.table.taxa, vec!["B"]);
        assert_eq!(normalized.table.cells, vec![present(&[5.0, 6.0])]);
        assert_eq!(normalized.raw_entries, 2);
        assert_eq!(normalized.unresolved_entries, 0);
    }

    #[test]
    fn unresolved_labels_fold_together() {
        let resolver = LabelResolver::new(";", TaxonRank::Genus).unwrap();
        let table = raw(
            &["k__A;p__B", "k__A;p__C"],
            &["S1"],
            vec![present(&[1.0]), present(&[2.0])],
        );

        let normalized = normalize(table, &resolver, NormalizeOptions::default()).unwrap();
        assert_eq!(normalized.table.taxa, vec![UNRESOLVED_LABEL]);
        assert_eq!(normalized.table.cells, vec![present(&[3.0])]);
        assert_eq!(normalized.unresolved_entries, 2);
    }

    #[test]
    fn column_orientation_returns_taxa_as_rows() {
        let resolver = LabelResolver::new(";", TaxonRank::Phylum).unwrap();
        let table = raw(
            &["S1", "S2"],
            &["k__A;p__B", "k__A;p__C", "k__A;p__B"],
            vec![present(&[1.0, 2.0, 3.0]), present(&[4.0, 5.0, 6.0])],
        );

        let options = NormalizeOptions {
            axis: LabelAxis::Columns,
            ..NormalizeOptions::default()
        };
        let normalized = normalize(table, &resolver, options).unwrap();
        assert_eq!(normalized.table.taxa, vec!["B", "C"]);
        assert_eq!(normalized.table.samples, vec!["S1", "S2"]);
        assert_eq!(
            normalized.table.cells,
            vec![present(&[4.0, 10.0]), present(&[2.0, 5.0])]
        );
    }

    #[test]
    fn missing_cells_do_not_poison_sums() {
        let resolver = LabelResolver::new(";", TaxonRank::Phylum).unwrap();
        let table = raw(
            &["k__A;p__B", "k__A;p__B"],
            &["S1", "S2"],
            vec![
                vec![Abundance::Missing, Abundance::Missing],
                vec![Abundance::Present(2.0), Abundance::Missing],
            ],
        );

        let normalized = normalize(table, &resolver, NormalizeOptions::default()).unwrap();
        assert_eq!(
            normalized.table.cells,
            vec![vec![Abundance::Present(2.0), Abundance::Missing]]
        );
    }

    #[test]
    fn strips_replicate_suffixes_on_request() {
        let resolver = LabelResolver::new(";", TaxonRank::Phylum).unwrap();
        let table = raw(
            &["k__A;p__B"],
            &["SampleA_V1", "SampleA_V2", "SampleB"],
            vec![present(&[1.0, 2.0, 3.0])],
        );

        let options = NormalizeOptions {
            strip_replicate_suffix: true,
            ..NormalizeOptions::default()
        };
        let normalized = normalize(table.clone(), &resolver, options).unwrap();
        assert_eq!(
            normalized.table.samples,
            vec!["SampleA", "SampleA", "SampleB"]
        );

        let untouched = normalize(table, &resolver, NormalizeOptions::default()).unwrap();
        assert_eq!(
            untouched.table.samples,
            vec!["SampleA_V1", "SampleA_V2", "SampleB"]
        );
    }
}
