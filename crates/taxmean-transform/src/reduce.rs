//! Power-mean reduction of the merged table.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use taxmean_model::{
    Abundance, FinalTable, MergedTable, MissingCell, PowerExponent, TaxonTable,
};

use crate::error::{Result, TransformError};
use crate::power_mean::power_mean_of_cells;

/// Groups merged rows by taxon: taxon → indices of its member rows.
pub fn group_by_taxon(merged: &MergedTable) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, row) in merged.rows.iter().enumerate() {
        groups.entry(row.taxon.as_str()).or_default().push(idx);
    }
    groups
}

/// Reduces each taxon group to one row of power means.
///
/// Rows and sample columns of the result are sorted by name. A cell whose
/// group has no present value is [`Abundance::Missing`] and is listed in
/// [`FinalTable::missing`].
pub fn reduce(merged: &MergedTable, power: PowerExponent) -> Result<FinalTable> {
    let groups = group_by_taxon(merged);

    let mut sample_order: Vec<usize> = (0..merged.samples.len()).collect();
    sample_order.sort_by(|a, b| merged.samples[*a].cmp(&merged.samples[*b]));
    let samples: Vec<String> = sample_order
        .iter()
        .map(|&col| merged.samples[col].clone())
        .collect();

    let mut taxa = Vec::with_capacity(groups.len());
    let mut cells = Vec::with_capacity(groups.len());
    let mut missing = Vec::new();
    let mut members: Vec<Abundance> = Vec::new();

    for (taxon, rows) in &groups {
        let mut reduced = Vec::with_capacity(sample_order.len());
        for &col in &sample_order {
            members.clear();
            members.extend(rows.iter().map(|&row| merged.rows[row].cells[col]));
            let cell = power_mean_of_cells(&members, power);
            if cell.is_missing() {
                debug!(taxon, sample = %merged.samples[col], "no present values");
                missing.push(MissingCell {
                    taxon: (*taxon).to_string(),
                    sample: merged.samples[col].clone(),
                });
            }
            reduced.push(cell);
        }
        taxa.push((*taxon).to_string());
        cells.push(reduced);
    }

    if !missing.is_empty() {
        warn!(
            cells = missing.len(),
            "taxon/sample pairs without any present value were left missing"
        );
    }
    debug!(
        taxa = taxa.len(),
        samples = samples.len(),
        power = %power,
        "reduced merged table"
    );

    let table = TaxonTable::new(taxa, samples, cells).map_err(|source| {
        TransformError::Shape {
            source_name: "merged table".to_string(),
            source,
        }
    })?;
    Ok(FinalTable { table, missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxmean_model::MergedRow;

    fn row(taxon: &str, source: usize, cells: Vec<Abundance>) -> MergedRow {
        MergedRow {
            taxon: taxon.to_string(),
            source,
            cells,
        }
    }

    #[test]
    fn groups_by_label_across_sources() {
        let merged = MergedTable {
            samples: vec!["S1".into()],
            rows: vec![
                row("B", 0, vec![Abundance::Present(2.0)]),
                row("C", 0, vec![Abundance::Present(1.0)]),
                row("B", 1, vec![Abundance::Present(4.0)]),
                row("B", 2, vec![Abundance::Present(6.0)]),
            ],
            sources: vec!["a.csv".into(), "b.csv".into(), "c.csv".into()],
        };

        let groups = group_by_taxon(&merged);
        assert_eq!(groups["B"], vec![0, 2, 3]);
        assert_eq!(groups["C"], vec![1]);

        let result = reduce(&merged, PowerExponent::ARITHMETIC).unwrap();
        assert_eq!(result.table.taxa, vec!["B", "C"]);
        assert_eq!(result.table.get("B", "S1"), Some(Abundance::Present(4.0)));
        assert_eq!(result.table.get("C", "S1"), Some(Abundance::Present(1.0)));
        assert!(result.missing.is_empty());
    }

    #[test]
    fn all_missing_group_yields_missing_cell() {
        let merged = MergedTable {
            samples: vec!["S2".into(), "S1".into()],
            rows: vec![
                row("B", 0, vec![Abundance::Missing, Abundance::Present(1.0)]),
                row("B", 1, vec![Abundance::Missing, Abundance::Present(3.0)]),
            ],
            sources: vec!["a.csv".into(), "b.csv".into()],
        };

        let result = reduce(&merged, PowerExponent::ARITHMETIC).unwrap();
        assert_eq!(result.table.samples, vec!["S1", "S2"]);
        assert_eq!(
            result.table.cells,
            vec![vec![Abundance::Present(2.0), Abundance::Missing]]
        );
        assert_eq!(
            result.missing,
            vec![MissingCell {
                taxon: "B".into(),
                sample: "S2".into()
            }]
        );
    }
}
