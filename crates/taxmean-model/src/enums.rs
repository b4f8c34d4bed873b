//! Type-safe enumerations for taxonomy metadata.
//!
//! These enums replace the loosely-typed strings that appear on the command
//! line and in source tables.
//!
//! # Hierarchy
//!
//! Taxonomic labels in abundance tables follow the fixed seven-level
//! hierarchy kingdom → phylum → class → order → family → genus → species.
//! Each level carries a single-letter prefix (`k__`, `p__`, ...) in
//! Greengenes/SILVA style labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Taxonomic rank (hierarchy level 0..6).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaxonRank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    #[default]
    Genus,
    Species,
}

impl TaxonRank {
    /// All ranks from the root of the hierarchy down.
    pub const ALL: [TaxonRank; 7] = [
        TaxonRank::Kingdom,
        TaxonRank::Phylum,
        TaxonRank::Class,
        TaxonRank::Order,
        TaxonRank::Family,
        TaxonRank::Genus,
        TaxonRank::Species,
    ];

    /// Zero-based position in the hierarchy (kingdom = 0).
    pub fn index(self) -> usize {
        match self {
            TaxonRank::Kingdom => 0,
            TaxonRank::Phylum => 1,
            TaxonRank::Class => 2,
            TaxonRank::Order => 3,
            TaxonRank::Family => 4,
            TaxonRank::Genus => 5,
            TaxonRank::Species => 6,
        }
    }

    /// Number of label segments a label must have to resolve at this rank.
    pub fn segment_count(self) -> usize {
        self.index() + 1
    }

    /// Single-letter prefix used by taxonomy databases (`g` for genus).
    pub fn prefix(self) -> char {
        match self {
            TaxonRank::Kingdom => 'k',
            TaxonRank::Phylum => 'p',
            TaxonRank::Class => 'c',
            TaxonRank::Order => 'o',
            TaxonRank::Family => 'f',
            TaxonRank::Genus => 'g',
            TaxonRank::Species => 's',
        }
    }

    /// Placeholder segment meaning "assigned but unnamed" (`g__`).
    pub fn placeholder(self) -> String {
        format!("{}__", self.prefix())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaxonRank::Kingdom => "kingdom",
            TaxonRank::Phylum => "phylum",
            TaxonRank::Class => "class",
            TaxonRank::Order => "order",
            TaxonRank::Family => "family",
            TaxonRank::Genus => "genus",
            TaxonRank::Species => "species",
        }
    }
}

impl fmt::Display for TaxonRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonRank {
    type Err = ConfigError;

    /// Accepts the full rank name or its single-letter prefix (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TaxonRank::ALL
            .into_iter()
            .find(|rank| {
                normalized == rank.as_str() || normalized == rank.prefix().to_string()
            })
            .ok_or_else(|| ConfigError::UnknownRank {
                value: s.to_string(),
            })
    }
}

/// Which axis of a source table carries the taxonomic labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAxis {
    /// Labels are the key-column values; data columns are samples.
    #[default]
    Rows,
    /// Labels are the data-column headers; key-column values are samples.
    Columns,
}

impl LabelAxis {
    pub fn from_transpose(transpose: bool) -> Self {
        if transpose {
            LabelAxis::Columns
        } else {
            LabelAxis::Rows
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelAxis::Rows => "rows",
            LabelAxis::Columns => "columns",
        }
    }
}

impl fmt::Display for LabelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
