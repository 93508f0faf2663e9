//! Value cleanup applied between matching and casting.

use regex::Regex;

use crate::pattern::{MatchMethod, ValueTransform};

/// Apply a pattern's replacements to a raw matched value.
///
/// Replacement keys are applied in a single pass, longest key first, so
/// `{"fourteen": "14", "four": "4"}` turns `fourteen,four` into `14,4`
/// rather than `14teen,4`. Fuzzy transforms lowercase both the value and
/// the keys before substituting. The result is trimmed; with no
/// replacements configured this is a plain trim.
pub fn apply(raw: &str, transform: &ValueTransform) -> String {
    let fuzzy = transform.match_method == MatchMethod::Fuzzy;

    let mut pairs: Vec<(String, &str)> = transform
        .replaces
        .iter()
        .filter(|(old, _)| !old.is_empty())
        .map(|(old, new)| {
            let old = if fuzzy { old.to_lowercase() } else { old.clone() };
            (old, new.as_str())
        })
        .collect();
    if pairs.is_empty() {
        return raw.trim().to_string();
    }

    let value = if fuzzy {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };

    // Stable sort keeps configuration order among equal-length keys.
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let alternation = pairs
        .iter()
        .map(|(old, _)| regex::escape(old))
        .collect::<Vec<_>>()
        .join("|");

    let replaced = match Regex::new(&alternation) {
        Ok(re) => re
            .replace_all(&value, |caps: &regex::Captures<'_>| {
                let hit = &caps[0];
                pairs
                    .iter()
                    .find(|(old, _)| old == hit)
                    .map(|(_, new)| (*new).to_string())
                    .unwrap_or_else(|| hit.to_string())
            })
            .into_owned(),
        Err(_) => value.clone(),
    };

    replaced.trim().to_string()
}
