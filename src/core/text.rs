//! Text normalization shared by the parser, the rule set and the filters.
//!
//! Every comparison between service names goes through [`normalize_text`]:
//! lower-cased, diacritics stripped (NFD decomposition with combining marks
//! removed) and whitespace collapsed to single spaces.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized comparison key for free text.
pub fn normalize_text(input: &str) -> String {
    let stripped: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    collapse_whitespace(&stripped)
}

/// Trim and collapse runs of whitespace to a single space, preserving case.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
