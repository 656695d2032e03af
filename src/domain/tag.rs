use crate::error::Result;
use regex::Regex;
use std::cmp::Ordering;

/// Pattern a tag name must match to count as a release marker
#[derive(Debug, Clone)]
pub struct ReleaseTagPattern {
    regex: Regex,
}

impl ReleaseTagPattern {
    /// Release tags contain a literal dot or underscore
    pub const DEFAULT: &'static str = "[._]";

    /// Compile a release tag pattern
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(ReleaseTagPattern {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Keep only the release tags, preserving input order
    pub fn filter<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|tag| self.matches(tag))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Strip a single leading `v` (e.g., "v1.2.3" -> "1.2.3", "vv1" -> "v1")
pub fn strip_v_prefix(name: &str) -> &str {
    name.strip_prefix('v').unwrap_or(name)
}

/// Return the greatest tag under version ordering, if any
pub fn latest_release_tag<'a>(tags: &[&'a str]) -> Option<&'a str> {
    tags.iter().copied().max_by(|a, b| compare_versions(a, b))
}

/// Version-aware comparison in the manner of `sort -V`.
///
/// Non-digit runs compare character by character, with `~` sorting before
/// the end of the string, letters before everything else. Digit runs compare
/// numerically with leading zeros ignored. Strings that compare equal under
/// those rules (e.g., "1.01" and "1.1") fall back to byte order.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match version_order(a.as_bytes(), b.as_bytes()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

fn char_weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(b'~') => -1,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => i32::from(c),
        Some(c) => i32::from(c) + 256,
    }
}

fn is_digit(c: Option<&u8>) -> bool {
    c.is_some_and(u8::is_ascii_digit)
}

fn version_order(a: &[u8], b: &[u8]) -> Ordering {
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit()) {
            let left = char_weight(a.get(i).copied());
            let right = char_weight(b.get(j).copied());
            if left != right {
                return left.cmp(&right);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while is_digit(a.get(i)) && is_digit(b.get(j)) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }

        if is_digit(a.get(i)) {
            return Ordering::Greater;
        }
        if is_digit(b.get(j)) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tags: &[&str]) -> Vec<String> {
        let mut tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        tags.sort_by(|a, b| compare_versions(a, b));
        tags
    }

    #[test]
    fn test_default_pattern_requires_dot_or_underscore() {
        let pattern = ReleaseTagPattern::new(ReleaseTagPattern::DEFAULT).unwrap();
        assert!(pattern.matches("1.0"));
        assert!(pattern.matches("v2.3.4"));
        assert!(pattern.matches("release_7"));
        assert!(!pattern.matches("nightly"));
        assert!(!pattern.matches("v2"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let pattern = ReleaseTagPattern::new(ReleaseTagPattern::DEFAULT).unwrap();
        let tags = vec![
            "1.10".to_string(),
            "latest".to_string(),
            "1.2".to_string(),
        ];
        assert_eq!(pattern.filter(&tags), vec!["1.10", "1.2"]);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(ReleaseTagPattern::new("[unclosed").is_err());
    }

    #[test]
    fn test_strip_v_prefix_once() {
        assert_eq!(strip_v_prefix("v2.3.4"), "2.3.4");
        assert_eq!(strip_v_prefix("2.3.4"), "2.3.4");
        assert_eq!(strip_v_prefix("vv1.0"), "v1.0");
        assert_eq!(strip_v_prefix("V1.0"), "V1.0");
    }

    #[test]
    fn test_numeric_segments_are_not_lexicographic() {
        assert_eq!(sorted(&["1.10", "1.2", "1.0"]), vec!["1.0", "1.2", "1.10"]);
    }

    #[test]
    fn test_latest_release_tag() {
        assert_eq!(latest_release_tag(&["1.0", "1.10", "1.2"]), Some("1.10"));
        assert_eq!(latest_release_tag(&[]), None);
    }

    #[test]
    fn test_prefix_sorts_by_characters_first() {
        assert_eq!(
            sorted(&["v1.10", "v1.9", "1.11"]),
            vec!["1.11", "v1.9", "v1.10"]
        );
    }

    #[test]
    fn test_tilde_sorts_before_release() {
        assert_eq!(compare_versions("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_fall_back_to_byte_order() {
        assert_eq!(version_order(b"1.01", b"1.1"), Ordering::Equal);
        assert_ne!(compare_versions("1.01", "1.1"), Ordering::Equal);
    }

    #[test]
    fn test_long_digit_runs_do_not_overflow() {
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
    }
}
