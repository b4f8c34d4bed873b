//! Taxonomic label resolution.
//!
//! A raw label such as `k__Bacteria;p__Firmicutes;c__Bacilli` is split on a
//! caller-supplied pattern into one segment per rank. A label resolves at a
//! rank only when it has exactly as many segments as that rank requires; any
//! shorter or longer label resolves to [`UNRESOLVED_LABEL`].

use regex::Regex;

use taxmean_model::{ConfigError, TaxonRank, UNRESOLVED_LABEL};

/// Segment marking an unnamed level without a rank letter.
const UNNAMED_SEGMENT: &str = "__";

/// Resolves `label` to its name at `rank`.
///
/// The selected segment is trimmed and its rank prefix (`p__`) removed. Empty
/// segments, bare placeholders (`g__`) and bare `__` resolve to [`UNRESOLVED_LABEL`].
pub fn resolve(label: &str, delimiter: &Regex, rank: TaxonRank) -> String {
    let segments: Vec<&str> = delimiter.split(label).collect();
    if segments.len() != rank.segment_count() {
        return UNRESOLVED_LABEL.to_string();
    }
    let Some(last) = segments.last() else {
        return UNRESOLVED_LABEL.to_string();
    };

    let segment = last.trim();
    let placeholder = rank.placeholder();
    let name = segment.strip_prefix(&placeholder).unwrap_or(segment).trim();
    if name.is_empty() || name == UNNAMED_SEGMENT {
        UNRESOLVED_LABEL.to_string()
    } else {
        name.to_string()
    }
}

/// A compiled delimiter pattern bound to a target rank.
#[derive(Debug, Clone)]
pub struct LabelResolver {
    delimiter: Regex,
    rank: TaxonRank,
}

impl LabelResolver {
    pub fn new(delimiter_pattern: &str, rank: TaxonRank) -> Result<Self, ConfigError> {
        if delimiter_pattern.is_empty() {
            return Err(ConfigError::MissingOption {
                option: "delimiter pattern",
            });
        }
        let delimiter = Regex::new(delimiter_pattern).map_err(|e| ConfigError::InvalidPattern {
            option: "delimiter",
            pattern: delimiter_pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { delimiter, rank })
    }

    pub fn rank(&self) -> TaxonRank {
        self.rank
    }

    pub fn pattern(&self) -> &str {
        self.delimiter.as_str()
    }

    pub fn resolve(&self, label: &str) -> String {
        resolve(label, &self.delimiter, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semicolon() -> Regex {
        Regex::new(";").unwrap()
    }

    #[test]
    fn resolves_exact_length_labels() {
        let label = "k__Bacteria;p__Firmicutes";
        assert_eq!(resolve(label, &semicolon(), TaxonRank::Phylum), "Firmicutes");
        assert_eq!(resolve(label, &semicolon(), TaxonRank::Genus), UNRESOLVED_LABEL);
    }

    #[test]
    fn longer_labels_do_not_truncate() {
        let label = "k__Bacteria;p__Firmicutes;c__Bacilli";
        assert_eq!(resolve(label, &semicolon(), TaxonRank::Phylum), UNRESOLVED_LABEL);
        assert_eq!(resolve(label, &semicolon(), TaxonRank::Class), "Bacilli");
    }

    #[test]
    fn placeholders_and_empty_segments_are_unresolved() {
        let re = semicolon();
        assert_eq!(resolve("k__Bacteria;p__", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
        assert_eq!(resolve("k__Bacteria;", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
        assert_eq!(resolve("k__Bacteria; ", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
    }

    #[test]
    fn bare_double_underscore_is_unresolved() {
        let re = semicolon();
        assert_eq!(resolve("k__Bacteria;__", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
        assert_eq!(resolve("k__Bacteria; __ ", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
        assert_eq!(resolve("__", &re, TaxonRank::Kingdom), UNRESOLVED_LABEL);
    }

    #[test]
    fn no_delimiter_match_is_single_segment() {
        let re = semicolon();
        assert_eq!(resolve("k__Bacteria", &re, TaxonRank::Kingdom), "Bacteria");
        assert_eq!(resolve("Bacteria", &re, TaxonRank::Kingdom), "Bacteria");
        assert_eq!(resolve("Bacteria", &re, TaxonRank::Phylum), UNRESOLVED_LABEL);
    }

    #[test]
    fn unprefixed_segments_are_kept() {
        let re = Regex::new(r"\.").unwrap();
        assert_eq!(resolve("Bacteria.Firmicutes", &re, TaxonRank::Phylum), "Firmicutes");
    }

    #[test]
    fn other_rank_prefix_is_not_stripped() {
        assert_eq!(
            resolve("k__Bacteria;g__Prevotella", &semicolon(), TaxonRank::Phylum),
            "g__Prevotella"
        );
    }

    #[test]
    fn resolver_rejects_bad_patterns() {
        assert!(matches!(
            LabelResolver::new("[", TaxonRank::Genus),
            Err(ConfigError::InvalidPattern { .. })
        ));
        assert!(matches!(
            LabelResolver::new("", TaxonRank::Genus),
            Err(ConfigError::MissingOption { .. })
        ));
    }

    #[test]
    fn regex_delimiters_are_supported() {
        let resolver = LabelResolver::new(r";\s*", TaxonRank::Phylum).unwrap();
        assert_eq!(resolver.resolve("k__Bacteria; p__Bacteroidota"), "Bacteroidota");
    }
}
