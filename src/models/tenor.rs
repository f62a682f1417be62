//! Tenor label codec
//!
//! Converts between tenor labels such as `"3M"` or `"1Y"` and horizons in whole
//! months. Only month and year suffixes are supported; week and day tenors have
//! no month representation and are rejected.

use crate::error::{GridError, GridResult};

const MONTHS_PER_YEAR: u32 = 12;

/// Parse a tenor label into a horizon in months.
///
/// The label must be a run of ASCII digits followed by `M` (months) or `Y`
/// (years). The integer must be positive. Signs, whitespace, fractional values
/// and lower-case suffixes are rejected.
///
/// # Example
///
/// ```rust
/// use surface_grid::models::tenor::parse_tenor;
///
/// assert_eq!(parse_tenor("3M").unwrap(), 3);
/// assert_eq!(parse_tenor("2Y").unwrap(), 24);
/// assert!(parse_tenor("1W").is_err());
/// ```
pub fn parse_tenor(label: &str) -> GridResult<u32> {
    let unsupported = || GridError::unsupported_tenor(label);

    let (digits, unit) = match label.char_indices().last() {
        Some((idx, unit @ ('M' | 'Y'))) => (&label[..idx], unit),
        _ => return Err(unsupported()),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unsupported());
    }

    let count: u32 = digits.parse().map_err(|_| unsupported())?;
    if count == 0 {
        return Err(unsupported());
    }

    match unit {
        'Y' => count.checked_mul(MONTHS_PER_YEAR).ok_or_else(unsupported),
        _ => Ok(count),
    }
}

/// Format a horizon in months as a display label.
///
/// Whole years are written with a `Y` suffix, everything else in months.
pub fn format_tenor(months: u32) -> String {
    if months > 0 && months % MONTHS_PER_YEAR == 0 {
        format!("{}Y", months / MONTHS_PER_YEAR)
    } else {
        format!("{}M", months)
    }
}

/// Parse a label and return its canonical spelling together with its horizon.
///
/// `"12M"` and `"1Y"` both canonicalise to `("1Y", 12)`.
pub fn canonical_label(label: &str) -> GridResult<(String, u32)> {
    let months = parse_tenor(label)?;
    Ok((format_tenor(months), months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_labels() {
        assert_eq!(parse_tenor("1M").unwrap(), 1);
        assert_eq!(parse_tenor("18M").unwrap(), 18);
        assert_eq!(parse_tenor("1Y").unwrap(), 12);
        assert_eq!(parse_tenor("10Y").unwrap(), 120);
        assert_eq!(parse_tenor("03M").unwrap(), 3);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for label in [
            "", "M", "Y", "0M", "0Y", "-1M", "+3M", "1.5Y", "3m", "1y", "1W", "1D", " 3M", "3M ",
            "3 M", "3MM", "ON",
        ] {
            assert!(
                matches!(
                    parse_tenor(label),
                    Err(GridError::UnsupportedTenorFormat { .. })
                ),
                "label {:?} should be rejected",
                label
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_tenor("4294967296M").is_err());
        assert!(parse_tenor("400000000Y").is_err());
    }

    #[test]
    fn test_format_prefers_years() {
        assert_eq!(format_tenor(1), "1M");
        assert_eq!(format_tenor(6), "6M");
        assert_eq!(format_tenor(12), "1Y");
        assert_eq!(format_tenor(18), "18M");
        assert_eq!(format_tenor(24), "2Y");
    }

    #[test]
    fn test_canonical_label() {
        assert_eq!(canonical_label("12M").unwrap(), ("1Y".to_string(), 12));
        assert_eq!(canonical_label("1Y").unwrap(), ("1Y".to_string(), 12));
        assert_eq!(canonical_label("4M").unwrap(), ("4M".to_string(), 4));
    }
}
