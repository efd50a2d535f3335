//! Field expansion: textual field → concrete set of permitted values

use crate::error::ExpansionError;
use crate::field::{is_all_digits, resolve_value, FieldKind};
use std::collections::BTreeSet;

/// Expand one field's text into the sorted set of values it denotes
///
/// Expansion re-checks ranges on its own and never trusts a prior
/// syntax pass: out-of-range values, unknown names, inverted ranges and
/// bad steps are all rejected here as well.
///
/// # Examples
///
/// ```
/// use a3s_cronexpr::{expand, FieldKind};
///
/// let hours = expand("9-17/4,22", FieldKind::Hour).unwrap();
/// assert_eq!(hours.into_iter().collect::<Vec<_>>(), vec![9, 13, 17, 22]);
/// ```
pub fn expand(field: &str, kind: FieldKind) -> Result<BTreeSet<u32>, ExpansionError> {
    let mut values = BTreeSet::new();

    for part in field.split(',') {
        expand_part(part.trim(), kind, &mut values)?;
    }

    if values.is_empty() {
        return Err(ExpansionError::Empty { field: kind });
    }

    Ok(values)
}

fn expand_part(
    part: &str,
    kind: FieldKind,
    values: &mut BTreeSet<u32>,
) -> Result<(), ExpansionError> {
    if part.is_empty() {
        return Err(ExpansionError::Empty { field: kind });
    }

    let range = kind.range();

    // Handle step values (e.g., */5, 0-30/5 or 10/15)
    let (base, step) = match part.split_once('/') {
        Some((base, step_str)) => {
            let step = parse_step(step_str, kind)?;
            (base, Some(step))
        }
        None => (part, None),
    };

    let (start, end) = if base == "*" {
        (range.min, range.max)
    } else if let Some((start, end)) = base.split_once('-') {
        let start = resolve(start, kind)?;
        let end = resolve(end, kind)?;
        if start > end {
            return Err(ExpansionError::InvertedRange {
                field: kind,
                start,
                end,
            });
        }
        (start, end)
    } else {
        let value = resolve(base, kind)?;
        // A stepped single value runs up to the field's ceiling
        match step {
            Some(_) => (value, range.max),
            None => (value, value),
        }
    };

    values.extend((start..=end).step_by(step.unwrap_or(1) as usize));
    Ok(())
}

fn parse_step(step: &str, kind: FieldKind) -> Result<u32, ExpansionError> {
    let invalid = || ExpansionError::InvalidStep {
        field: kind,
        token: step.to_string(),
    };
    if !is_all_digits(step) {
        return Err(invalid());
    }
    match step.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(step) => Ok(step),
    }
}

/// Resolve a name or literal and check it against the field's bounds
fn resolve(token: &str, kind: FieldKind) -> Result<u32, ExpansionError> {
    let value = resolve_value(token, kind).ok_or_else(|| ExpansionError::UnknownName {
        field: kind,
        token: token.to_string(),
    })?;

    let range = kind.range();
    if !range.contains(value) {
        return Err(ExpansionError::OutOfRange {
            field: kind,
            value,
            range,
        });
    }

    Ok(value)
}
