//! core::temporal
//!
//! Segment access for the `temporal_subset` attribute.
//!
//! A temporal subset is a hyphen-joined string `start[-end[-suffix]]`,
//! e.g. `200601-210012` or `197901-200812-clim`. The record never stores
//! `t_start`, `t_end` or `temporal_suffix`; they are read and written
//! through these functions so the subset stays the single source of truth.

/// Separator between temporal subset segments.
pub const SEPARATOR: char = '-';

/// Segment index of the range start.
pub const START: usize = 0;

/// Segment index of the range end.
pub const END: usize = 1;

/// Segment index of the optional suffix.
pub const SUFFIX: usize = 2;

/// Return the segment at `index`, if present.
///
/// ```
/// use climdir::core::temporal::{segment, START, END, SUFFIX};
///
/// assert_eq!(segment("200601-210012", START), Some("200601"));
/// assert_eq!(segment("200601-210012", END), Some("210012"));
/// assert_eq!(segment("200601-210012", SUFFIX), None);
/// ```
pub fn segment(subset: &str, index: usize) -> Option<&str> {
    subset.split(SEPARATOR).nth(index)
}

/// Number of segments in `subset`.
pub fn segment_count(subset: &str) -> usize {
    subset.split(SEPARATOR).count()
}

/// Return the suffix segment.
///
/// A suffix exists only when the subset has exactly three segments.
pub fn suffix(subset: &str) -> Option<&str> {
    let segments: Vec<&str> = subset.split(SEPARATOR).collect();
    match segments.as_slice() {
        [_, _, suffix] => Some(suffix),
        _ => None,
    }
}

/// Whether `value` can stand as a single segment.
pub fn is_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains(SEPARATOR)
}

/// Rewrite the segment at `index` and re-join.
///
/// When the subset is one segment short the value is appended instead.
/// Callers check the value with [`is_segment`] first.
pub fn with_segment(subset: &str, index: usize, value: &str) -> String {
    let mut segments: Vec<&str> = subset.split(SEPARATOR).collect();
    if index < segments.len() {
        segments[index] = value;
    } else {
        segments.push(value);
    }
    join(&segments)
}

/// Replace the suffix if one exists, otherwise append it.
///
/// Returns `None` unless the subset is `start-end` or `start-end-suffix`,
/// since anywhere else the value would not read back as the suffix.
///
/// ```
/// use climdir::core::temporal::with_suffix;
///
/// assert_eq!(with_suffix("200601-210012", "clim").as_deref(), Some("200601-210012-clim"));
/// assert_eq!(with_suffix("200601-210012-clim", "avg").as_deref(), Some("200601-210012-avg"));
/// assert_eq!(with_suffix("200601", "clim"), None);
/// ```
pub fn with_suffix(subset: &str, value: &str) -> Option<String> {
    match segment_count(subset) {
        2 | 3 => Some(with_segment(subset, SUFFIX, value)),
        _ => None,
    }
}

/// Drop the suffix segment, if any.
pub fn without_suffix(subset: &str) -> String {
    if suffix(subset).is_some() {
        let segments: Vec<&str> = subset.split(SEPARATOR).take(SUFFIX).collect();
        join(&segments)
    } else {
        subset.to_string()
    }
}

fn join(segments: &[&str]) -> String {
    segments.join(&SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_of_range() {
        assert_eq!(segment("200601-210012", START), Some("200601"));
        assert_eq!(segment("200601-210012", END), Some("210012"));
        assert_eq!(segment("200601", END), None);
    }

    #[test]
    fn suffix_requires_three_segments() {
        assert_eq!(suffix("200601-210012"), None);
        assert_eq!(suffix("200601-210012-clim"), Some("clim"));
        assert_eq!(suffix("1-2-3-4"), None);
    }

    #[test]
    fn rewrite_start_and_end() {
        assert_eq!(with_segment("200601-210012", START, "200001"), "200001-210012");
        assert_eq!(with_segment("200601-210012", END, "205012"), "200601-205012");
        assert_eq!(
            with_segment("200601-210012-clim", START, "190001"),
            "190001-210012-clim"
        );
    }

    #[test]
    fn rewrite_missing_end_appends() {
        assert_eq!(with_segment("200601", END, "210012"), "200601-210012");
    }

    #[test]
    fn suffix_append_then_replace() {
        let subset = with_suffix("200001-210012", "clim").unwrap();
        assert_eq!(subset, "200001-210012-clim");
        assert_eq!(suffix(&subset), Some("clim"));

        let subset = with_suffix(&subset, "anom").unwrap();
        assert_eq!(subset, "200001-210012-anom");
    }

    #[test]
    fn suffix_needs_start_and_end() {
        assert_eq!(with_suffix("200601", "clim"), None);
        assert_eq!(with_suffix("1-2-3-4", "clim"), None);
    }

    #[test]
    fn segment_values() {
        assert!(is_segment("200601"));
        assert!(is_segment("clim"));
        assert!(!is_segment(""));
        assert!(!is_segment("2000-01"));
    }

    #[test]
    fn drop_suffix() {
        assert_eq!(without_suffix("200001-210012-clim"), "200001-210012");
        assert_eq!(without_suffix("200001-210012"), "200001-210012");
    }
}
