//! The line classifier/matcher engine and result aggregation.

use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{ParseError, ValidationError};
use crate::pattern::{validate_patterns, MatchMethod, Pattern, ValueTransform, ValueType};
use crate::value::Value;

use super::{cast, label, transform};

/// Default line separator.
const LINE_SEPARATOR: &str = "\n";

/// A configured extraction engine.
///
/// The engine holds configuration only; [`Normalizer::parse`] keeps all
/// working state (consumed-pattern flags, continuation state, normalized
/// keyword tables) local to the invocation, so one engine serves any
/// number of parses, including through shared references.
#[derive(Debug, Clone)]
pub struct Normalizer {
    patterns: Vec<Pattern>,
    separator: String,
    strict: bool,
    extra_labels: Vec<String>,
    defaults: IndexMap<String, Value>,
    validation: Option<ValidationError>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            separator: LINE_SEPARATOR.to_string(),
            strict: false,
            extra_labels: Vec::new(),
            defaults: IndexMap::new(),
            validation: Some(ValidationError::NoPatterns),
        }
    }

    /// Set the line separator (empty restores the default `"\n"`).
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        let separator = separator.into();
        self.separator = if separator.is_empty() {
            LINE_SEPARATOR.to_string()
        } else {
            separator
        };
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.set_separator(separator);
        self
    }

    /// Strict mode compares labels case-sensitively and keeps inner
    /// whitespace; the default mode folds both.
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.set_strict_mode(strict);
        self
    }

    /// Extra known labels for the continuation pre-check, beyond the
    /// patterns' own. Useful when a document contains labeled lines no
    /// pattern extracts, which must still not bleed into earlier fields.
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_labels = labels.into_iter().map(Into::into).collect();
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_labels(labels);
        self
    }

    /// Replace the pattern set, coercing default values and re-validating.
    pub fn set_patterns(&mut self, patterns: Vec<Pattern>) {
        let mut defaults = IndexMap::with_capacity(patterns.len());
        for pattern in &patterns {
            defaults.insert(
                pattern.value_key.clone(),
                Value::coerce(&pattern.default_value, pattern.value_type),
            );
        }
        self.validation = validate_patterns(&patterns).err();
        self.patterns = patterns;
        self.defaults = defaults;
    }

    pub fn with_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.set_patterns(patterns);
        self
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Cached validation result for the current pattern set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.validation {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Parse a text blob into the configured mapping.
    ///
    /// The mapping starts from the patterns' coerced defaults and always
    /// covers every configured value key. With no patterns or empty text
    /// the defaults are returned unchanged; an invalid pattern set yields
    /// the defaults plus the validation error as the sole diagnostic.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome {
            items: self.defaults.clone(),
            errors: Vec::new(),
        };

        let text = text.trim();
        if self.patterns.is_empty() || text.is_empty() {
            return outcome;
        }
        if let Err(err) = self.validate() {
            outcome.errors.push(ParseError::Validation(err));
            return outcome;
        }

        info!(
            "parsing {} characters against {} patterns",
            text.len(),
            self.patterns.len()
        );

        for field in self.classify_lines(text) {
            let cleaned = transform::apply(&field.value, &field.transform);
            let value = match cast::cast(&cleaned, field.value_type, &field.transform.separators) {
                Ok(value) => value,
                Err(fallback) => {
                    outcome.errors.push(ParseError::Cast {
                        key: field.key.clone(),
                        value: cleaned,
                        value_type: field.value_type,
                    });
                    fallback
                }
            };
            merge(&mut outcome.items, &field.key, value);
        }

        outcome
    }

    /// Split the text into lines and resolve each against the pattern set.
    fn classify_lines(&self, text: &str) -> Vec<ResolvedField> {
        let known_labels = self.known_labels();
        let keywords: Vec<Vec<String>> = self
            .patterns
            .iter()
            .map(|pattern| {
                pattern
                    .labels
                    .iter()
                    .map(|keyword| label::normalize(keyword, self.strict))
                    .filter(|keyword| !keyword.is_empty())
                    .collect()
            })
            .collect();

        let mut used = vec![false; self.patterns.len()];
        let mut fields: Vec<ResolvedField> = Vec::new();
        // Pure-text lines attach to the previous field until an
        // unrecognized labeled line breaks the flow.
        let mut continuation_allowed = true;

        for line in text.split(self.separator.as_str()) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let cleaned = label::normalize(line, self.strict);
            let is_pure_text = !known_labels
                .iter()
                .any(|known| cleaned.starts_with(known.as_str()));

            if is_pure_text && continuation_allowed {
                // Text before any field has resolved is dropped.
                let Some(previous) = fields.last() else {
                    continue;
                };
                let continuation = previous.continuation(line);
                debug!("line continues field {}", continuation.key);
                fields.push(continuation);
            }

            match self.match_line(line, &keywords, &mut used) {
                Some(field) => {
                    debug!("matched {} via label {:?}", field.key, field.label);
                    continuation_allowed = true;
                    fields.push(field);
                }
                None => {
                    // A labeled line no pattern claims must not bleed
                    // into the previous field.
                    if !is_pure_text {
                        continuation_allowed = false;
                    }
                }
            }
        }

        fields
    }

    /// Match one line against the first unconsumed pattern that claims it.
    ///
    /// Ties break by pattern declaration order, then keyword order.
    fn match_line(
        &self,
        line: &str,
        keywords: &[Vec<String>],
        used: &mut [bool],
    ) -> Option<ResolvedField> {
        for (index, pattern) in self.patterns.iter().enumerate() {
            if used[index] {
                continue;
            }
            let separator = pattern.separator_or_default();
            let Some(at) = line.find(separator) else {
                continue;
            };
            let candidate = label::normalize(&line[..at], self.strict);
            for keyword in &keywords[index] {
                let hit = match pattern.match_method {
                    MatchMethod::Fuzzy => label::contains_word(&candidate, keyword),
                    MatchMethod::Exact => candidate == *keyword,
                };
                if hit {
                    used[index] = true;
                    return Some(ResolvedField {
                        key: pattern.value_key.clone(),
                        label: candidate,
                        value: line[at + separator.len()..].trim().to_string(),
                        value_type: pattern.value_type,
                        transform: pattern.value_transform.clone(),
                    });
                }
            }
        }
        None
    }

    /// Union of explicit labels and all pattern labels, normalized.
    fn known_labels(&self) -> HashSet<String> {
        let mut known = HashSet::new();
        let pattern_labels = self.patterns.iter().flat_map(|p| p.labels.iter());
        for raw in self.extra_labels.iter().chain(pattern_labels) {
            let normalized = label::normalize(raw, self.strict);
            if !normalized.is_empty() {
                known.insert(normalized);
            }
        }
        known
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line resolved against one pattern; consumed by the aggregator.
#[derive(Debug, Clone)]
struct ResolvedField {
    key: String,
    label: String,
    value: String,
    value_type: ValueType,
    transform: ValueTransform,
}

impl ResolvedField {
    /// A continuation record carrying this field's key and typing.
    fn continuation(&self, line: &str) -> Self {
        Self {
            value: line.to_string(),
            ..self.clone()
        }
    }
}

/// Fold a typed value into the mapping with type-specific combination.
///
/// Strings append with a newline once non-empty, arrays concatenate,
/// scalars overwrite. This is what turns continuation records into
/// multi-paragraph strings and multi-element arrays.
fn merge(items: &mut IndexMap<String, Value>, key: &str, value: Value) {
    match items.entry(key.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
            (Value::Str(existing), Value::Str(new)) => {
                if existing.is_empty() {
                    *existing = new;
                } else {
                    existing.push('\n');
                    existing.push_str(&new);
                }
            }
            (Value::Array(existing), Value::Array(new)) => existing.extend(new),
            (slot, new) => *slot = new,
        },
    }
}

/// The result mapping and diagnostics of one parse.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    items: IndexMap<String, Value>,
    errors: Vec<ParseError>,
}

impl ParseOutcome {
    /// True when no diagnostics were recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The key → typed value mapping. Covers every configured value key,
    /// in pattern declaration order.
    pub fn items(&self) -> &IndexMap<String, Value> {
        &self.items
    }

    pub fn into_items(self) -> IndexMap<String, Value> {
        self.items
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Diagnostics in the order they were recorded.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The mapping as a compact JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    /// The mapping as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.items)
    }

    /// The mapping as a JSON value tree.
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.items)
    }
}
