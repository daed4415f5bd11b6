//! Slug validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase alphanumeric segments joined by single hyphens.
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Check a user-supplied slug against the canonical shape.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Candidate for the nth probe of a colliding base slug: `base`, `base-1`, ...
pub fn probe_candidate(base: &str, index: u32) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_hyphenated_slugs() {
        assert!(is_valid_slug("photo"));
        assert!(is_valid_slug("photo-editing-101"));
        assert!(is_valid_slug("2024"));
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Photo"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("unicode-ảnh"));
    }

    #[test]
    fn probe_sequence_appends_numeric_suffixes() {
        assert_eq!(probe_candidate("base", 0), "base");
        assert_eq!(probe_candidate("base", 1), "base-1");
        assert_eq!(probe_candidate("base", 2), "base-2");
    }
}
