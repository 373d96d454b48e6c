//! Version-annotation construction
//!
//! Each surviving row gets a derived annotation summarizing extracted
//! year/number fragments, the install count and the raw version string,
//! e.g. `2019: 3x (16.0.1)`. Rows without a version contribute no
//! annotation at all.

use crate::normalizer::standalone_two_digit_spans;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_ANY_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// First word-bounded four-digit number in `text`, else empty.
///
/// Applied to the normalized title, not the raw one, so a year only
/// surfaces here when the normalization chain left it standing.
pub fn extract_year(text: &str) -> String {
    RE_ANY_YEAR
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First standalone two-digit number in `text`, else empty.
///
/// Uses the same guards as the normalizer's two-digit rule: word-bounded,
/// not preceded by `(`, not followed by `.`.
pub fn extract_two_digit(text: &str) -> String {
    standalone_two_digit_spans(text)
        .first()
        .map(|span| text[span.clone()].to_string())
        .unwrap_or_default()
}

/// Build the per-row version annotation.
///
/// A missing version yields the empty string; the row then contributes
/// nothing to the joined version details of its group. Otherwise the
/// year and two-digit prefixes are included only when their extraction
/// found something.
pub fn build_version_annotation(
    normalized_title: &str,
    install_count: i64,
    version: Option<&str>,
) -> String {
    let Some(version) = version else {
        return String::new();
    };

    let mut annotation = String::new();

    let year = extract_year(normalized_title);
    if !year.is_empty() {
        annotation.push_str(&year);
        annotation.push_str(": ");
    }

    let number = extract_two_digit(normalized_title);
    if !number.is_empty() {
        annotation.push_str(&number);
        annotation.push_str(": ");
    }

    annotation.push_str(&format!("{}x ({})", install_count, version));
    annotation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("Office 2019 Professional"), "2019");
        assert_eq!(extract_year("Office Professional"), "");
        // Adjacent word characters block the boundary
        assert_eq!(extract_year("X2019y"), "");
    }

    #[test]
    fn test_extract_two_digit() {
        assert_eq!(extract_two_digit("Flash Player 30"), "30");
        assert_eq!(extract_two_digit("Flash Player"), "");
        assert_eq!(extract_two_digit("(32 Bit"), "");
        assert_eq!(extract_two_digit("rev 32."), "");
    }

    #[test]
    fn test_missing_version_yields_empty_annotation() {
        assert_eq!(build_version_annotation("Office", 3, None), "");
    }

    #[test]
    fn test_plain_annotation() {
        assert_eq!(
            build_version_annotation("Office", 3, Some("16.0.1")),
            "3x (16.0.1)"
        );
    }

    #[test]
    fn test_year_prefix() {
        assert_eq!(
            build_version_annotation("Office 2019", 5, Some("16.0")),
            "2019: 5x (16.0)"
        );
    }

    #[test]
    fn test_year_and_number_prefix() {
        assert_eq!(
            build_version_annotation("Office 2019 Player 30", 2, Some("1.2")),
            "2019: 30: 2x (1.2)"
        );
    }
}
