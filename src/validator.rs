//! Syntax validation for six-field cron expressions
//!
//! Checks the grammar of every field without producing values:
//! - `*` - any value
//! - `,` - list separator (e.g., `1,3,5`)
//! - `-` - range (e.g., `1-5`, `mon-fri`)
//! - `/` - step (e.g., `*/5`, `0-30/5`, `10/15`)
//!
//! Months and weekdays also accept case-insensitive three-letter names.

use crate::error::SyntaxError;
use crate::field::{is_all_digits, resolve_value, FieldKind};

/// Validate an expression, reporting the first structural error found
///
/// # Examples
///
/// ```
/// use a3s_cronexpr::validate;
///
/// assert!(validate("0 0 9 * jan-dec mon-fri").is_ok());
/// assert!(validate("0 0 9 * * 8").is_err());
/// ```
pub fn validate(expression: &str) -> Result<(), SyntaxError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(SyntaxError::EmptyExpression);
    }

    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() != FieldKind::ALL.len() {
        return Err(SyntaxError::FieldCount {
            found: fields.len(),
        });
    }

    for (field, kind) in fields.iter().zip(FieldKind::ALL) {
        validate_field(field, kind)?;
    }

    Ok(())
}

/// Same checks as [`validate`], reduced to a boolean
pub fn is_valid(expression: &str) -> bool {
    validate(expression).is_ok()
}

/// Validate one field's text
pub(crate) fn validate_field(field: &str, kind: FieldKind) -> Result<(), SyntaxError> {
    if field.is_empty() {
        return Err(SyntaxError::EmptyField { field: kind });
    }

    if let Some(character) = field
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '*' | '/' | ',' | '-')))
    {
        return Err(SyntaxError::IllegalCharacter {
            field: kind,
            token: field.to_string(),
            character,
        });
    }

    if field.starts_with(',') || field.ends_with(',') || field.contains(",,") {
        return Err(SyntaxError::MalformedList {
            field: kind,
            token: field.to_string(),
        });
    }

    for part in field.split(',') {
        if part.is_empty() {
            return Err(SyntaxError::EmptyField { field: kind });
        }
        validate_part(part, kind)?;
    }

    Ok(())
}

fn validate_part(part: &str, kind: FieldKind) -> Result<(), SyntaxError> {
    let Some((base, step)) = part.split_once('/') else {
        return validate_range_or_value(part, kind);
    };

    let malformed = || SyntaxError::MalformedStep {
        field: kind,
        token: part.to_string(),
    };

    if base.is_empty() || !is_all_digits(step) {
        return Err(malformed());
    }
    let step: u32 = step.parse().map_err(|_| malformed())?;
    if step == 0 {
        return Err(SyntaxError::NonPositiveStep {
            field: kind,
            token: part.to_string(),
        });
    }

    validate_range_or_value(base, kind)
}

fn validate_range_or_value(token: &str, kind: FieldKind) -> Result<(), SyntaxError> {
    if token == "*" {
        return Ok(());
    }

    if !token.contains('-') {
        validate_value(token, kind)?;
        return Ok(());
    }

    let mut endpoints = token.split('-');
    let (Some(start), Some(end), None) = (endpoints.next(), endpoints.next(), endpoints.next())
    else {
        return Err(SyntaxError::MalformedRange {
            field: kind,
            token: token.to_string(),
        });
    };
    if start.is_empty() || end.is_empty() {
        return Err(SyntaxError::MalformedRange {
            field: kind,
            token: token.to_string(),
        });
    }

    let start = validate_value(start, kind)?;
    let end = validate_value(end, kind)?;
    if start > end {
        return Err(SyntaxError::InvertedRange {
            field: kind,
            token: token.to_string(),
            start,
            end,
        });
    }

    Ok(())
}

/// Check a single value token and return what it resolves to
fn validate_value(token: &str, kind: FieldKind) -> Result<u32, SyntaxError> {
    if let Some(value) = kind.resolve_name(token) {
        return Ok(value);
    }

    if !is_all_digits(token) {
        return Err(SyntaxError::UnknownName {
            field: kind,
            token: token.to_string(),
        });
    }

    let range = kind.range();
    match resolve_value(token, kind) {
        Some(value) if range.contains(value) => Ok(value),
        _ => Err(SyntaxError::OutOfRange {
            field: kind,
            token: token.to_string(),
            range,
        }),
    }
}
