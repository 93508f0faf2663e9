//! Typed values produced by the extraction engine.

use std::fmt;

use serde::Serialize;
use serde_json::Value as Json;

use crate::pattern::ValueType;

/// A typed extraction result, one case per declared [`ValueType`].
///
/// Serializes transparently, so a result mapping renders as plain JSON
/// (`{"name": "John", "age": 12}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Array(Vec<String>),
}

impl Value {
    /// The zero value for a declared type.
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String => Value::Str(String::new()),
            ValueType::Boolean => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Array => Value::Array(Vec::new()),
        }
    }

    /// Leniently coerce a configured default into the declared type.
    ///
    /// Never fails: input that cannot be converted degrades to the
    /// type's zero value.
    pub fn coerce(raw: &Json, value_type: ValueType) -> Self {
        match value_type {
            ValueType::Boolean => Value::Bool(coerce_bool(raw)),
            ValueType::Int => Value::Int(coerce_int(raw)),
            ValueType::Float => Value::Float(coerce_float(raw)),
            ValueType::Array => Value::Array(coerce_array(raw)),
            ValueType::String => Value::Str(coerce_string(raw)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Array(items) => f.write_str(&items.join(", ")),
        }
    }
}

fn coerce_bool(raw: &Json) -> bool {
    match raw {
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Json::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "t" | "true" | "y" | "yes"
        ),
        _ => false,
    }
}

fn coerce_int(raw: &Json) -> i64 {
    match raw {
        Json::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Json::String(s) => s.trim().parse().unwrap_or(0),
        Json::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn coerce_float(raw: &Json) -> f64 {
    match raw {
        Json::Number(n) => n.as_f64().unwrap_or(0.0),
        Json::String(s) => s.trim().parse().unwrap_or(0.0),
        Json::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

fn coerce_array(raw: &Json) -> Vec<String> {
    match raw {
        Json::Array(items) => items.iter().map(coerce_string).collect(),
        _ => Vec::new(),
    }
}

fn coerce_string(raw: &Json) -> String {
    match raw {
        Json::String(s) => s.clone(),
        Json::Number(n) => n.to_string(),
        Json::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
