//! Index normalization shared by LRANGE and LTRIM.

use super::ListError;
use std::ops::RangeInclusive;

/// Resolve a possibly-negative inclusive `[start, end]` pair against a list
/// of `len` items.
///
/// Negative indices count from the tail. An `end` past the tail is clamped,
/// but a `start` that is still negative after normalization, or that lands
/// after `end`, is rejected.
pub fn normalize(len: usize, start: i64, end: i64) -> Result<RangeInclusive<usize>, ListError> {
    let n = len as i64;
    let first = if start < 0 { n + start } else { start };
    let mut last = if end < 0 { n + end } else { end };

    if last >= n {
        last = n - 1;
    }

    if first < 0 || first > last {
        return Err(ListError::InvalidRange { start, end });
    }

    Ok(first as usize..=last as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_bounds() {
        assert_eq!(normalize(6, 0, 2).unwrap(), 0..=2);
        assert_eq!(normalize(6, 0, 0).unwrap(), 0..=0);
    }

    #[test]
    fn test_negative_bounds() {
        assert_eq!(normalize(6, -3, -1).unwrap(), 3..=5);
        assert_eq!(normalize(6, 0, -1).unwrap(), 0..=5);
    }

    #[test]
    fn test_end_is_clamped() {
        assert_eq!(normalize(6, 4, 8).unwrap(), 4..=5);
        assert_eq!(normalize(6, 0, i64::MAX).unwrap(), 0..=5);
    }

    #[test]
    fn test_start_is_never_clamped() {
        // -10 normalizes to -4 on a list of 6
        assert_eq!(
            normalize(6, -10, 2),
            Err(ListError::InvalidRange { start: -10, end: 2 })
        );
        assert!(normalize(6, 6, 8).is_err());
    }

    #[test]
    fn test_inverted_bounds() {
        assert!(normalize(6, -1, 2).is_err());
        assert!(normalize(6, -1, -2).is_err());
        assert!(normalize(6, 0, -10).is_err());
    }

    #[test]
    fn test_empty_list_has_no_valid_range() {
        assert!(normalize(0, 0, -1).is_err());
        assert!(normalize(0, 0, 0).is_err());
    }

    #[test]
    fn test_extreme_negative_start() {
        assert!(normalize(3, i64::MIN, 0).is_err());
    }
}
