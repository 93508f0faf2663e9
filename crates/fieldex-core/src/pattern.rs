//! Declarative extraction patterns and their validation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::ValidationError;

/// How a label keyword is compared against a line's label text.
///
/// Serialized as the wire integers `0` (exact) and `1` (fuzzy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MatchMethod {
    /// The normalized label must equal the keyword.
    #[default]
    Exact,
    /// The keyword must occur as a whole word inside the label,
    /// case-insensitive. `name` matches `your name` but not `username`.
    Fuzzy,
}

impl TryFrom<u8> for MatchMethod {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(MatchMethod::Exact),
            1 => Ok(MatchMethod::Fuzzy),
            other => Err(format!("invalid match method {other}, expected 0 or 1")),
        }
    }
}

impl From<MatchMethod> for u8 {
    fn from(method: MatchMethod) -> u8 {
        match method {
            MatchMethod::Exact => 0,
            MatchMethod::Fuzzy => 1,
        }
    }
}

/// The declared output type of a pattern's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    Int,
    Float,
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Pre-cast cleanup applied to a matched raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueTransform {
    /// Matching mode for `replaces` keys (fuzzy = case-insensitive).
    pub match_method: MatchMethod,
    /// Substring replacements, applied in a single pass, longest key first.
    pub replaces: IndexMap<String, String>,
    /// Literal tokens the value is split on when the type is `array`.
    pub separators: Vec<String>,
}

impl ValueTransform {
    pub fn is_empty(&self) -> bool {
        self.replaces.is_empty() && self.separators.is_empty()
    }
}

/// One extraction directive: which labels feed which output key and type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    /// Label keywords that identify this field on a line.
    pub labels: Vec<String>,
    /// How keywords are compared against line labels.
    pub match_method: MatchMethod,
    /// Text dividing the label from the value on a line.
    pub separator: String,
    /// Output key in the result mapping.
    pub value_key: String,
    /// Declared type of the extracted value.
    pub value_type: ValueType,
    /// Value cleanup applied before casting.
    pub value_transform: ValueTransform,
    /// Initial value for `value_key`, coerced to `value_type`.
    pub default_value: Json,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            match_method: MatchMethod::Exact,
            separator: ":".to_string(),
            value_key: String::new(),
            value_type: ValueType::String,
            value_transform: ValueTransform::default(),
            default_value: Json::Null,
        }
    }
}

impl Pattern {
    /// Create a pattern writing to `value_key` with the given type.
    pub fn new(value_key: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            value_key: value_key.into(),
            value_type,
            ..Self::default()
        }
    }

    /// Add a label keyword.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Set the label match method.
    pub fn with_match_method(mut self, match_method: MatchMethod) -> Self {
        self.match_method = match_method;
        self
    }

    /// Set the label/value separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the value transform.
    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.value_transform = transform;
        self
    }

    /// Set the default value (coerced to `value_type` by the engine).
    pub fn with_default(mut self, default_value: impl Into<Json>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// The effective label/value separator (`":"` when unset).
    pub fn separator_or_default(&self) -> &str {
        if self.separator.is_empty() {
            ":"
        } else {
            &self.separator
        }
    }
}

/// Check a pattern set for structural soundness before any parse.
///
/// Fails on the first violation found: a blank value key or empty label
/// list on any pattern, then a value key or label keyword shared
/// (case-insensitively) between two patterns.
pub fn validate_patterns(patterns: &[Pattern]) -> Result<(), ValidationError> {
    if patterns.is_empty() {
        return Err(ValidationError::NoPatterns);
    }

    for (i, first) in patterns.iter().enumerate() {
        if first.value_key.trim().is_empty() {
            return Err(ValidationError::EmptyValueKey { index: i + 1 });
        }
        if first.labels.is_empty() {
            return Err(ValidationError::EmptyLabels { index: i + 1 });
        }
        for (j, second) in patterns.iter().enumerate().skip(i + 1) {
            if first.value_key.trim().to_lowercase() == second.value_key.trim().to_lowercase() {
                return Err(ValidationError::DuplicateValueKey {
                    first: i + 1,
                    second: j + 1,
                    value_key: first.value_key.clone(),
                });
            }
            for k1 in &first.labels {
                for k2 in &second.labels {
                    if k1.trim().to_lowercase() == k2.trim().to_lowercase() {
                        return Err(ValidationError::DuplicateLabel {
                            first: i + 1,
                            second: j + 1,
                            label: k1.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "labels": ["age"],
            "match_method": 1,
            "value_key": "age",
            "value_type": "int",
            "value_transform": {
                "match_method": 1,
                "replaces": {"years": ""},
                "separators": []
            },
            "default_value": 0
        }"#;

        let pattern: Pattern = serde_json::from_str(json).unwrap();

        assert_eq!(pattern.match_method, MatchMethod::Fuzzy);
        assert_eq!(pattern.value_type, ValueType::Int);
        assert_eq!(pattern.separator, ":");
        assert_eq!(pattern.value_transform.match_method, MatchMethod::Fuzzy);
        assert_eq!(
            pattern.value_transform.replaces.get("years"),
            Some(&String::new())
        );
    }

    #[test]
    fn serializes_match_method_as_integer() {
        let pattern = Pattern::new("k", ValueType::String)
            .with_label("k")
            .with_match_method(MatchMethod::Fuzzy);
        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["match_method"], 1);
        assert_eq!(json["value_type"], "string");
    }

    #[test]
    fn rejects_unknown_match_method() {
        let result = serde_json::from_str::<Pattern>(r#"{"match_method": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_value_type() {
        let result = serde_json::from_str::<Pattern>(r#"{"value_type": "decimal"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_disjoint_patterns() {
        let patterns = vec![
            Pattern::new("name", ValueType::String).with_label("name"),
            Pattern::new("age", ValueType::Int).with_label("age"),
        ];
        assert_eq!(validate_patterns(&patterns), Ok(()));
    }

    #[test]
    fn rejects_empty_pattern_set() {
        assert_eq!(validate_patterns(&[]), Err(ValidationError::NoPatterns));
    }

    #[test]
    fn rejects_blank_value_key() {
        let patterns = vec![Pattern::new("  ", ValueType::String).with_label("name")];
        assert_eq!(
            validate_patterns(&patterns),
            Err(ValidationError::EmptyValueKey { index: 1 })
        );
    }

    #[test]
    fn rejects_missing_labels() {
        let patterns = vec![Pattern::new("name", ValueType::String)];
        assert_eq!(
            validate_patterns(&patterns),
            Err(ValidationError::EmptyLabels { index: 1 })
        );
    }

    #[test]
    fn rejects_duplicate_value_keys_case_insensitively() {
        let patterns = vec![
            Pattern::new("name", ValueType::String).with_label("name"),
            Pattern::new("NAME", ValueType::String).with_label("nickname"),
        ];
        assert_eq!(
            validate_patterns(&patterns),
            Err(ValidationError::DuplicateValueKey {
                first: 1,
                second: 2,
                value_key: "name".to_string(),
            })
        );
    }

    #[test]
    fn rejects_duplicate_labels_case_insensitively() {
        let patterns = vec![
            Pattern::new("name", ValueType::String).with_label("Name"),
            Pattern::new("nickname", ValueType::String).with_label("name"),
        ];
        assert_eq!(
            validate_patterns(&patterns),
            Err(ValidationError::DuplicateLabel {
                first: 1,
                second: 2,
                label: "Name".to_string(),
            })
        );
    }
}
