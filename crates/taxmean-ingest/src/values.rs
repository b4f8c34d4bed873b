//! Cell value parsing.
//!
//! Converts raw text cells into [`Abundance`] values with an explicit list of
//! missing-value tokens instead of relying on NaN propagation.

use taxmean_model::Abundance;

/// Text tokens treated as a missing measurement (case-insensitive).
pub const MISSING_TOKENS: [&str; 6] = ["", "na", "nan", "n/a", "null", "none"];

/// Returns true when the raw cell denotes a missing value.
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Parses a raw cell.
///
/// Returns `None` when the text is neither a number nor a missing token.
pub fn parse_abundance(value: Option<&str>) -> Option<Abundance> {
    let Some(raw) = value else {
        return Some(Abundance::Missing);
    };
    if is_missing_token(raw) {
        return Some(Abundance::Missing);
    }
    raw.trim().parse::<f64>().ok().map(Abundance::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_missing_tokens() {
        assert_eq!(parse_abundance(Some(" 12 ")), Some(Abundance::Present(12.0)));
        assert_eq!(parse_abundance(Some("0.25")), Some(Abundance::Present(0.25)));
        assert_eq!(parse_abundance(Some("1e3")), Some(Abundance::Present(1000.0)));
        assert_eq!(parse_abundance(None), Some(Abundance::Missing));
        assert_eq!(parse_abundance(Some("")), Some(Abundance::Missing));
        assert_eq!(parse_abundance(Some("NA")), Some(Abundance::Missing));
        assert_eq!(parse_abundance(Some("NaN")), Some(Abundance::Missing));
        assert_eq!(parse_abundance(Some("abc")), None);
    }
}
