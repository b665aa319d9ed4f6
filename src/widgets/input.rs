//! Numeric text input normalization
//!
//! Widget inputs arrive as raw text. Anything that is not a usable number
//! becomes "no value" instead of an error.

/// Parse a non-negative whole number
pub fn parse_whole(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}

/// Parse a finite, non-negative decimal number
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers() {
        assert_eq!(parse_whole("125"), Some(125));
        assert_eq!(parse_whole("  7 "), Some(7));
        assert_eq!(parse_whole("0"), Some(0));
        assert_eq!(parse_whole(""), None);
        assert_eq!(parse_whole("abc"), None);
        assert_eq!(parse_whole("-3"), None);
        assert_eq!(parse_whole("2.5"), None);
    }

    #[test]
    fn decimals() {
        assert_eq!(parse_decimal("200"), Some(200.0));
        assert_eq!(parse_decimal("12.5"), Some(12.5));
        assert_eq!(parse_decimal(" 0 "), Some(0.0));
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("twenty"), None);
    }
}
