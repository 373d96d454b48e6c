//! Software title normalization
//!
//! Collapses free-text inventory titles to a canonical form by stripping
//! version numbers, years, bracketed qualifiers and vendor suffixes. The
//! rewrite order is load-bearing: later patterns operate on the output of
//! earlier removals, and swapping steps changes results (a year inside a
//! hyphenated tail is only removed when the tail has not been truncated
//! away first).

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static RE_DOTTED_VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)+\b").unwrap());
static RE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static RE_FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());
static RE_THREE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3}\b").unwrap());
static RE_BRACKET_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*").unwrap());
static RE_HYPHEN_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-.*").unwrap());
static RE_V_DIGIT_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"V\d.*").unwrap());
static RE_BUILD_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"B\d{3}").unwrap());
static RE_KIT_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Kit.*").unwrap());
static RE_IV_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"IV.*").unwrap());
static RE_FIFTEEN_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"15.*").unwrap());
static RE_DOTS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.\s]+$").unwrap());
static RE_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Normalize a raw software title to its canonical form.
///
/// Missing titles map to the empty string, as do titles that dissolve
/// entirely under the rewrites. The result is trimmed. Re-applying the
/// function to its own output is a no-op: no pattern matches a title the
/// chain has already cleaned.
pub fn normalize(title: Option<&str>) -> String {
    let Some(raw) = title else {
        return String::new();
    };

    // 1. Dotted multi-segment version numbers (e.g. 12.0.1)
    let no_versions = RE_DOTTED_VERSION.replace_all(raw, "");
    // 2. Standalone two-digit numbers (e.g. Flash Player 30)
    let no_two_digits = remove_standalone_two_digits(&no_versions);
    // 3. Four-digit numbers in a typical year format
    let no_years = RE_YEAR.replace_all(&no_two_digits, "");
    // 4. Everything from the first parenthesis (e.g. (64-Bit))
    let no_bracket = RE_BRACKET_TAIL.replace(&no_years, "");
    // 5. Everything from a space-hyphen, for clearing list suffixes
    let no_hyphen = RE_HYPHEN_TAIL.replace(&no_bracket, "");
    // 6. Remaining four-digit numbers
    let no_four_digits = RE_FOUR_DIGITS.replace_all(&no_hyphen, "");
    // 7. Capital V directly followed by a digit, and everything after it
    let no_v = RE_V_DIGIT_TAIL.replace(&no_four_digits, "");
    // 8. "B" followed by exactly three digits
    let no_build = RE_BUILD_NUMBER.replace_all(&no_v, "");
    // 9. Everything after "Kit"
    let no_kit_tail = RE_KIT_TAIL.replace(&no_build, "Kit");
    // 10. Remaining three-digit numbers
    let no_three_digits = RE_THREE_DIGITS.replace_all(&no_kit_tail, "");
    // 11. Everything after "IV"
    let no_iv_tail = RE_IV_TAIL.replace(&no_three_digits, "IV");
    // 12. Legacy vendor-string quirk: "15" truncates wherever it appears,
    //     deliberately not word-bounded
    let no_fifteen = RE_FIFTEEN_TAIL.replace(&no_iv_tail, "");
    // 13. Titles consisting of dots and whitespace only
    let no_specials = RE_DOTS_ONLY.replace(&no_fifteen, "");

    // 14. Two characters or fewer (before trimming) is rewrite residue,
    //     not a product name
    if no_specials.chars().count() <= 2 {
        return String::new();
    }

    no_specials.trim().to_string()
}

/// Spans of standalone two-digit numbers: word-bounded runs of exactly two
/// digits, excluding those preceded by `(` or followed by `.` (those forms
/// are version fragments, not counters).
///
/// The regex crate has no lookaround, so the guards are checked against the
/// neighboring characters of each digit run.
pub(crate) fn standalone_two_digit_spans(text: &str) -> Vec<Range<usize>> {
    RE_DIGIT_RUN
        .find_iter(text)
        .filter(|m| {
            if m.as_str().len() != 2 {
                return false;
            }
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            let word_bounded =
                !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
            word_bounded && before != Some('(') && after != Some('.')
        })
        .map(|m| m.range())
        .collect()
}

fn remove_standalone_two_digits(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in standalone_two_digit_spans(text) {
        out.push_str(&text[last..span.start]);
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
