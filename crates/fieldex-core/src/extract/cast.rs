//! Casting of cleaned raw values into typed [`Value`]s.

use crate::pattern::ValueType;
use crate::value::Value;

/// Cast a cleaned raw value to the declared type.
///
/// On failure the `Err` carries the zero value the failed parse produced,
/// so the caller can record a diagnostic and still populate the mapping.
pub fn cast(raw: &str, value_type: ValueType, separators: &[String]) -> Result<Value, Value> {
    match value_type {
        ValueType::Boolean => cast_bool(raw),
        ValueType::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Value::Int(0)),
        ValueType::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Value::Float(0.0)),
        ValueType::Array => Ok(Value::Array(split_multi(raw, separators))),
        ValueType::String => Ok(Value::Str(raw.to_string())),
    }
}

fn cast_bool(raw: &str) -> Result<Value, Value> {
    if raw.is_empty() {
        return Ok(Value::Bool(false));
    }
    match raw.to_lowercase().as_str() {
        "y" | "yes" | "1" | "t" | "true" => Ok(Value::Bool(true)),
        "n" | "no" | "0" | "f" | "false" => Ok(Value::Bool(false)),
        _ => Err(Value::Bool(false)),
    }
}

/// Split a value on every separator token, trimming each element.
///
/// Tokens are literal text, not regexes. Elements that trim to empty are
/// dropped; empty input yields an empty sequence; with no separators the
/// trimmed value is the sole element.
pub fn split_multi(value: &str, separators: &[String]) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = vec![value.to_string()];
    for separator in separators.iter().filter(|s| !s.is_empty()) {
        parts = parts
            .iter()
            .flat_map(|part| part.split(separator.as_str()))
            .map(str::to_string)
            .collect();
    }
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
