//! Error types for a3s-cronexpr

use crate::field::{FieldKind, FieldRange};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Structural errors reported before any numeric interpretation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Expression is empty or whitespace only
    #[error("Expression cannot be empty")]
    EmptyExpression,

    /// Wrong number of whitespace-separated fields
    #[error("Cron expression must have 6 fields, got {found}")]
    FieldCount { found: usize },

    /// A comma-separated part of a field is empty
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: FieldKind },

    /// Character outside `[0-9A-Za-z*/,-]`
    #[error("Field '{field}' contains invalid character '{character}' in '{token}'")]
    IllegalCharacter {
        field: FieldKind,
        token: String,
        character: char,
    },

    /// Leading, trailing or doubled comma
    #[error("Field '{field}' has malformed comma usage: '{token}'")]
    MalformedList { field: FieldKind, token: String },

    /// Missing or non-numeric step, or a bad step base
    #[error("Invalid step syntax '{token}' in field '{field}'")]
    MalformedStep { field: FieldKind, token: String },

    /// Step of zero
    #[error("Step must be positive in '{token}' for field '{field}'")]
    NonPositiveStep { field: FieldKind, token: String },

    /// Range without exactly two non-empty endpoints
    #[error("Invalid range syntax '{token}' in field '{field}'")]
    MalformedRange { field: FieldKind, token: String },

    /// Range whose start exceeds its end
    #[error("Inverted range '{token}' in field '{field}': {start} > {end}")]
    InvertedRange {
        field: FieldKind,
        token: String,
        start: u32,
        end: u32,
    },

    /// Token that is neither a known name nor a decimal literal
    #[error("Unknown value '{token}' in field '{field}'")]
    UnknownName { field: FieldKind, token: String },

    /// Literal outside the field's bounds
    #[error("Value '{token}' is out of range {range} for field '{field}'")]
    OutOfRange {
        field: FieldKind,
        token: String,
        range: FieldRange,
    },
}

impl SyntaxError {
    /// Field the error was reported for, if it is field-level
    pub fn field(&self) -> Option<FieldKind> {
        match self {
            SyntaxError::EmptyExpression | SyntaxError::FieldCount { .. } => None,
            SyntaxError::EmptyField { field }
            | SyntaxError::IllegalCharacter { field, .. }
            | SyntaxError::MalformedList { field, .. }
            | SyntaxError::MalformedStep { field, .. }
            | SyntaxError::NonPositiveStep { field, .. }
            | SyntaxError::MalformedRange { field, .. }
            | SyntaxError::InvertedRange { field, .. }
            | SyntaxError::UnknownName { field, .. }
            | SyntaxError::OutOfRange { field, .. } => Some(*field),
        }
    }
}

/// Errors raised while turning field text into values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// Field text produced no values
    #[error("Field '{field}' produced no values")]
    Empty { field: FieldKind },

    /// Resolved value outside the field's bounds
    #[error("Value {value} is out of range {range} for field '{field}'")]
    OutOfRange {
        field: FieldKind,
        value: u32,
        range: FieldRange,
    },

    /// Token that is neither a known name nor a decimal literal
    #[error("Unknown value '{token}' in field '{field}'")]
    UnknownName { field: FieldKind, token: String },

    /// Range whose start exceeds its end
    #[error("Inverted range {start}-{end} in field '{field}'")]
    InvertedRange {
        field: FieldKind,
        start: u32,
        end: u32,
    },

    /// Zero, missing or non-numeric step
    #[error("Invalid step '{token}' in field '{field}'")]
    InvalidStep { field: FieldKind, token: String },
}

/// Errors returned by parsing and next-run resolution
#[derive(Debug, Error)]
pub enum CronError {
    /// Expression failed the syntax check
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Field could not be expanded into values
    #[error("Expansion error: {0}")]
    Expansion(#[from] ExpansionError),

    /// No matching instant within the iteration ceiling
    #[error("No next run found after {from} within {iterations} iterations")]
    NoNextRun {
        from: NaiveDateTime,
        iterations: u64,
    },

    /// Invalid resolver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for cron operations
pub type Result<T> = std::result::Result<T, CronError>;
