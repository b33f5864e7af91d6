//! CLI string-to-config conversions

use crate::Result;
use anyhow::Context;

/// Parse an inclusive bin-count range
///
/// Accepts "MIN-MAX" (e.g. "2-10") or a single count (e.g. "16", meaning
/// 16-16). Whitespace around the numbers is ignored. Range ordering is the
/// validator's job, not the parser's.
pub fn parse_bin_range(s: &str) -> Result<(usize, usize)> {
    let s = s.trim();

    if let Some((lo, hi)) = s.split_once('-') {
        let min_bins: usize = lo
            .trim()
            .parse()
            .with_context(|| format!("Invalid bin range start: '{}'", lo.trim()))?;
        let max_bins: usize = hi
            .trim()
            .parse()
            .with_context(|| format!("Invalid bin range end: '{}'", hi.trim()))?;
        Ok((min_bins, max_bins))
    } else {
        let bins: usize = s
            .parse()
            .with_context(|| format!("Invalid bin count: '{}'", s))?;
        Ok((bins, bins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bin_range_pair() {
        assert_eq!(parse_bin_range("2-10").unwrap(), (2, 10));
        assert_eq!(parse_bin_range(" 3 - 7 ").unwrap(), (3, 7));
    }

    #[test]
    fn test_parse_bin_range_single() {
        assert_eq!(parse_bin_range("16").unwrap(), (16, 16));
    }

    #[test]
    fn test_parse_bin_range_reversed_is_parsed() {
        // Parser stays permissive; the validator rejects reversed ranges
        assert_eq!(parse_bin_range("10-2").unwrap(), (10, 2));
    }

    #[test]
    fn test_parse_bin_range_invalid() {
        assert!(parse_bin_range("").is_err());
        assert!(parse_bin_range("two-ten").is_err());
        assert!(parse_bin_range("2-").is_err());
        assert!(parse_bin_range("-5").is_err());
    }
}
