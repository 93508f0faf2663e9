//! Error types for the fieldex-core library.

use thiserror::Error;

use crate::pattern::ValueType;

/// Main error type for the fieldex library.
#[derive(Error, Debug)]
pub enum FieldexError {
    /// Pattern set failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed profile or pattern JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors detected while validating a pattern set.
///
/// Pattern indices are 1-based, matching how patterns are counted in
/// profile files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The pattern set is empty.
    #[error("no patterns configured")]
    NoPatterns,

    /// A pattern has a blank output key.
    #[error("pattern {index} has an empty value key")]
    EmptyValueKey { index: usize },

    /// A pattern has no label keywords.
    #[error("pattern {index} has no label keywords")]
    EmptyLabels { index: usize },

    /// Two patterns write to the same output key.
    #[error("patterns {first} and {second} share the value key {value_key:?}")]
    DuplicateValueKey {
        first: usize,
        second: usize,
        value_key: String,
    },

    /// Two patterns claim the same label keyword.
    #[error("patterns {first} and {second} share the label keyword {label:?}")]
    DuplicateLabel {
        first: usize,
        second: usize,
        label: String,
    },
}

/// A diagnostic recorded during one parse.
///
/// Parse diagnostics are non-fatal: a validation failure aborts line
/// processing but still yields the default mapping, and a cast failure
/// only affects its own field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The configured pattern set is invalid. Always the sole entry.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A matched value failed to cast to its declared type.
    #[error("field {key}: cannot cast {value:?} to {value_type}")]
    Cast {
        key: String,
        value: String,
        value_type: ValueType,
    },
}

/// Result type for the fieldex library.
pub type Result<T> = std::result::Result<T, FieldexError>;
