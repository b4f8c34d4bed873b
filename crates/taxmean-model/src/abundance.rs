//! Numeric-or-missing cell values.

use serde::{Deserialize, Serialize};

/// A single abundance cell.
///
/// Missing cells are tracked explicitly instead of through NaN so that
/// reductions can skip them without poisoning the result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Abundance {
    Present(f64),
    #[default]
    Missing,
}

impl Abundance {
    pub fn value(self) -> Option<f64> {
        match self {
            Abundance::Present(v) => Some(v),
            Abundance::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Abundance::Missing)
    }

    /// Adds another cell; missing operands contribute nothing.
    pub fn accumulate(self, other: Abundance) -> Abundance {
        match (self, other) {
            (Abundance::Present(a), Abundance::Present(b)) => Abundance::Present(a + b),
            (Abundance::Present(a), Abundance::Missing)
            | (Abundance::Missing, Abundance::Present(a)) => Abundance::Present(a),
            (Abundance::Missing, Abundance::Missing) => Abundance::Missing,
        }
    }
}

impl From<Option<f64>> for Abundance {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => Abundance::Present(v),
            _ => Abundance::Missing,
        }
    }
}

impl From<f64> for Abundance {
    fn from(value: f64) -> Self {
        Abundance::from(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_missing() {
        assert!(Abundance::from(f64::NAN).is_missing());
        assert_eq!(Abundance::from(2.5).value(), Some(2.5));
    }

    #[test]
    fn accumulate_skips_missing() {
        let sum = Abundance::Missing
            .accumulate(Abundance::Present(3.0))
            .accumulate(Abundance::Missing)
            .accumulate(Abundance::Present(2.0));
        assert_eq!(sum, Abundance::Present(5.0));
        assert_eq!(
            Abundance::Missing.accumulate(Abundance::Missing),
            Abundance::Missing
        );
    }
}
