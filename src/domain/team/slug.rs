//! Team slug canonicalization
//!
//! A slug is the team's URL-safe identifier. Non-ASCII text is transliterated
//! first (`"Café"` -> `"Cafe"`). Then underscores become hyphens, every
//! run of characters outside `[A-Za-z0-9-]` becomes a single hyphen, repeated
//! hyphens collapse, boundary hyphens are trimmed and the result is lowercased.
//! Slugs compare case-insensitively everywhere through [`slug_key`].

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Word separator used in slugs
pub const SLUG_SEPARATOR: &str = "-";

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

static REPEATED_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Canonicalize a candidate slug, e.g. `"My_Cool Team!"` -> `"my-cool-team"`
pub fn normalize_slug(candidate: &str) -> String {
    let hyphenated = deunicode(candidate).replace('_', SLUG_SEPARATOR);
    let parameterized = DISALLOWED.replace_all(&hyphenated, SLUG_SEPARATOR);
    let collapsed = REPEATED_SEPARATOR.replace_all(&parameterized, SLUG_SEPARATOR);

    collapsed.trim_matches('-').to_lowercase()
}

/// Comparison form of a slug for case-insensitive lookups and uniqueness
pub fn slug_key(slug: &str) -> String {
    slug.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_input() {
        assert_eq!(normalize_slug("My_Cool Team!"), "my-cool-team");
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_slug("Rocket"), "rocket");
        assert_eq!(normalize_slug("Team-Alpha"), "team-alpha");
    }

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize_slug("a - b__c"), "a-b-c");
        assert_eq!(normalize_slug("--edge--"), "edge");
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize_slug("Team 42"), "team-42");
    }

    #[test]
    fn test_normalize_transliterates() {
        assert_eq!(normalize_slug("Café Crème"), "cafe-creme");
        assert_eq!(normalize_slug("Über_Straße"), "uber-strasse");
    }

    #[test]
    fn test_normalize_can_empty_out() {
        assert_eq!(normalize_slug("!!!"), "");
        assert_eq!(normalize_slug(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_slug("Hello, World_2");
        assert_eq!(normalize_slug(&once), once);
    }

    #[test]
    fn test_slug_key_ignores_case() {
        assert_eq!(slug_key("Team-Alpha"), slug_key("team-ALPHA"));
    }
}
