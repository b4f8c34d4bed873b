//! Cross-file table merging.

use std::collections::HashMap;

use tracing::debug;

use taxmean_model::{Abundance, MergedRow, MergedTable, NormalizedTable};

use crate::error::{Result, TransformError};

/// Stacks normalized tables over the union of their sample columns.
///
/// Samples a table lacks are filled with [`Abundance::Missing`]. Taxa are not
/// deduplicated across tables; grouping is left to the reducer. When a table
/// repeats a sample name (stripped replicate columns), each repeat lands in
/// its own stacked entry so no measurement is lost.
pub fn merge(tables: Vec<NormalizedTable>) -> Result<MergedTable> {
    if tables.is_empty() {
        return Err(TransformError::NoTables);
    }

    let mut samples: Vec<String> = Vec::new();
    let mut sample_index: HashMap<String, usize> = HashMap::new();
    for normalized in &tables {
        for sample in &normalized.table.samples {
            if !sample_index.contains_key(sample) {
                sample_index.insert(sample.clone(), samples.len());
                samples.push(sample.clone());
            }
        }
    }

    let mut rows = Vec::new();
    let mut sources = Vec::with_capacity(tables.len());
    for (source, normalized) in tables.into_iter().enumerate() {
        // Source columns feeding each union sample, in table order.
        let mut layout: Vec<Vec<usize>> = vec![Vec::new(); samples.len()];
        for (col, sample) in normalized.table.samples.iter().enumerate() {
            layout[sample_index[sample]].push(col);
        }
        let depth = layout.iter().map(Vec::len).max().unwrap_or(0).max(1);

        let NormalizedTable {
            source: path,
            table,
            ..
        } = normalized;
        for (taxon, values) in table.taxa.into_iter().zip(table.cells) {
            for layer in 0..depth {
                let cells = layout
                    .iter()
                    .map(|cols| {
                        cols.get(layer)
                            .map_or(Abundance::Missing, |&col| values[col])
                    })
                    .collect();
                rows.push(MergedRow {
                    taxon: taxon.clone(),
                    source,
                    cells,
                });
            }
        }
        sources.push(path);
    }

    debug!(
        tables = sources.len(),
        rows = rows.len(),
        samples = samples.len(),
        "merged tables"
    );

    Ok(MergedTable {
        samples,
        rows,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxmean_model::TaxonTable;

    fn normalized(name: &str, taxa: &[&str], samples: &[&str], cells: Vec<Vec<f64>>) -> NormalizedTable {
        let table = TaxonTable::new(
            taxa.iter().map(|s| s.to_string()).collect(),
            samples.iter().map(|s| s.to_string()).collect(),
            cells
                .into_iter()
                .map(|row| row.into_iter().map(Abundance::Present).collect())
                .collect(),
        )
        .unwrap();
        NormalizedTable {
            source: name.into(),
            raw_entries: table.height(),
            unresolved_entries: 0,
            table,
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = merge(Vec::new()).unwrap_err();
        assert!(matches!(err, TransformError::NoTables));
        assert_eq!(err.to_string(), "no matching input files found");
    }

    #[test]
    fn outer_joins_sample_columns() {
        let merged = merge(vec![
            normalized("a.csv", &["B"], &["S1"], vec![vec![1.0]]),
            normalized("b.csv", &["B", "C"], &["S2"], vec![vec![2.0], vec![3.0]]),
        ])
        .unwrap();

        assert_eq!(merged.samples, vec!["S1", "S2"]);
        assert_eq!(merged.height(), 3);
        assert_eq!(
            merged.rows[0].cells,
            vec![Abundance::Present(1.0), Abundance::Missing]
        );
        assert_eq!(
            merged.rows[2].cells,
            vec![Abundance::Missing, Abundance::Present(3.0)]
        );
        assert_eq!(merged.rows[2].source, 1);
    }

    #[test]
    fn keeps_duplicate_taxa_across_files() {
        let merged = merge(vec![
            normalized("a.csv", &["B"], &["S1"], vec![vec![1.0]]),
            normalized("b.csv", &["B"], &["S1"], vec![vec![2.0]]),
        ])
        .unwrap();
        assert_eq!(merged.height(), 2);
        assert!(merged.rows.iter().all(|row| row.taxon == "B"));
    }

    #[test]
    fn spreads_replicate_columns_over_stacked_rows() {
        let merged = merge(vec![normalized(
            "a.csv",
            &["B"],
            &["S1", "S1", "S2"],
            vec![vec![1.0, 3.0, 5.0]],
        )])
        .unwrap();

        assert_eq!(merged.samples, vec!["S1", "S2"]);
        assert_eq!(merged.height(), 2);
        assert_eq!(
            merged.rows[0].cells,
            vec![Abundance::Present(1.0), Abundance::Present(5.0)]
        );
        assert_eq!(
            merged.rows[1].cells,
            vec![Abundance::Present(3.0), Abundance::Missing]
        );
    }
}
