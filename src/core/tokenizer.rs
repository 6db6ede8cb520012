// src/core/tokenizer.rs

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN_RE: Regex =
        Regex::new(r"\s+").expect("whitespace pattern is a valid regex");
}

/// Splits a raw console line into path/argument segments.
///
/// Runs of whitespace collapse into one separator and the line is trimmed
/// before splitting, so no segment is ever empty, except that an empty or
/// blank line yields the single segment `""`.
pub fn tokenize(raw: &str) -> Vec<String> {
    let collapsed = WHITESPACE_RUN_RE.replace_all(raw, " ");
    collapsed.trim().split(' ').map(str::to_owned).collect()
}

/// Whether `tokens` is the blank-line marker produced by [`tokenize`].
pub fn is_blank(tokens: &[String]) -> bool {
    matches!(tokens, [only] if only.is_empty())
}
