//! Label normalization and keyword matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Runs of two or more whitespace characters.
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Canonicalize a label for comparison.
///
/// Strict mode trims surrounding whitespace and preserves case. The
/// default mode additionally folds full-width spaces to ASCII, collapses
/// whitespace runs to a single space, and lowercases the result, so
/// `"Please input you      name"` compares as `"please input you name"`.
pub fn normalize(label: &str, strict: bool) -> String {
    if label.is_empty() {
        return String::new();
    }
    if strict {
        return label.trim().to_string();
    }
    let folded = label.replace('\u{3000}', " ");
    let collapsed = MULTI_SPACE.replace_all(&folded, " ");
    collapsed.trim().to_lowercase()
}

/// Whole-word, case-insensitive containment of `keyword` in `label`.
///
/// The keyword must be bounded by the string edges or whitespace:
/// `name` matches `your name` but not `username`.
pub fn contains_word(label: &str, keyword: &str) -> bool {
    if keyword.is_empty() || label.is_empty() {
        return false;
    }
    let pattern = format!(r"(?i)(^|\s+){}($|\s+)", regex::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(label),
        Err(_) => false,
    }
}
