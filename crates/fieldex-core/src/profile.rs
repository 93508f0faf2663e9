//! Named extraction profiles loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::Normalizer;
use crate::pattern::Pattern;

/// A reusable, file-backed extraction configuration: patterns bundled
/// with the engine settings they expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Display name of the profile.
    pub name: String,
    /// Line separator for input texts.
    pub separator: String,
    /// Extra known labels beyond the patterns' own.
    pub labels: Vec<String>,
    /// The extraction patterns.
    pub patterns: Vec<Pattern>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            separator: "\n".to_string(),
            labels: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

impl Profile {
    /// Load a profile from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Parse a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the profile as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build an engine configured from this profile.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new()
            .with_separator(self.separator.clone())
            .with_labels(self.labels.clone())
            .with_patterns(self.patterns.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::value::Value;

    #[test]
    fn builds_a_working_engine_from_json() {
        let json = r#"{
            "name": "person",
            "separator": "\n",
            "labels": ["remark"],
            "patterns": [
                {"labels": ["name"], "value_key": "name", "value_type": "string"},
                {
                    "labels": ["age"],
                    "value_key": "age",
                    "value_type": "int",
                    "value_transform": {"match_method": 1, "replaces": {"years": ""}}
                }
            ]
        }"#;

        let profile = Profile::from_json(json).unwrap();
        assert_eq!(profile.name, "person");

        let outcome = profile.normalizer().parse("name: Ada\nage: 36 years");
        assert!(outcome.is_ok(), "{:?}", outcome.errors());
        assert_eq!(outcome.get("name"), Some(&Value::Str("Ada".to_string())));
        assert_eq!(outcome.get("age"), Some(&Value::Int(36)));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let profile = Profile::from_json(r#"{"name": "empty"}"#).unwrap();
        assert_eq!(profile.separator, "\n");
        assert!(profile.patterns.is_empty());
    }

    #[test]
    fn round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let profile = Profile {
            name: "roundtrip".to_string(),
            ..Profile::default()
        };
        profile.save(&path).unwrap();

        let loaded = Profile::from_file(&path).unwrap();
        assert_eq!(loaded.name, "roundtrip");
    }
}
