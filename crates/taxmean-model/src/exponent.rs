//! Power-mean exponent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Exponent of the generalized (power) mean.
///
/// Parsed from an integer literal or the literal `inf`. Non-integer input is
/// a configuration error rather than being coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerExponent {
    Finite(i32),
    /// The limit as the exponent grows without bound: the maximum.
    Infinite,
}

impl PowerExponent {
    /// The arithmetic mean.
    pub const ARITHMETIC: PowerExponent = PowerExponent::Finite(1);

    pub fn as_f64(self) -> f64 {
        match self {
            PowerExponent::Finite(p) => f64::from(p),
            PowerExponent::Infinite => f64::INFINITY,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, PowerExponent::Infinite)
    }
}

impl Default for PowerExponent {
    fn default() -> Self {
        PowerExponent::ARITHMETIC
    }
}

impl fmt::Display for PowerExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerExponent::Finite(p) => write!(f, "{p}"),
            PowerExponent::Infinite => f.write_str("inf"),
        }
    }
}

impl FromStr for PowerExponent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(p) = trimmed.parse::<i32>() {
            return Ok(PowerExponent::Finite(p));
        }
        if trimmed == "inf" {
            return Ok(PowerExponent::Infinite);
        }
        Err(ConfigError::InvalidExponent {
            value: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_inf() {
        assert_eq!("1".parse::<PowerExponent>().unwrap(), PowerExponent::Finite(1));
        assert_eq!("-2".parse::<PowerExponent>().unwrap(), PowerExponent::Finite(-2));
        assert_eq!("inf".parse::<PowerExponent>().unwrap(), PowerExponent::Infinite);
    }

    #[test]
    fn rejects_non_integers() {
        for raw in ["1.5", "infinity", "Inf", "", "two"] {
            let err = raw.parse::<PowerExponent>().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidExponent { .. }), "{raw}");
        }
    }

    #[test]
    fn display_round_trips() {
        for exp in [PowerExponent::Finite(3), PowerExponent::Infinite] {
            assert_eq!(exp.to_string().parse::<PowerExponent>().unwrap(), exp);
        }
    }
}
