//! Core library for rule-based field extraction from semi-structured text.
//!
//! fieldex turns loosely formatted `label: value` text — forms, messages,
//! reports — into a typed key → value mapping driven by declarative
//! patterns. This crate provides:
//!
//! - the pattern model and its validation (labels, match methods, types)
//! - the line classifier/matcher with multi-line continuation handling
//! - value transformation (longest-key-first replacement) and casting
//! - JSON profiles bundling patterns with engine settings

pub mod error;
pub mod extract;
pub mod pattern;
pub mod profile;
pub mod value;

pub use error::{FieldexError, ParseError, Result, ValidationError};
pub use extract::{Normalizer, ParseOutcome};
pub use pattern::{validate_patterns, MatchMethod, Pattern, ValueTransform, ValueType};
pub use profile::Profile;
pub use value::Value;
