//! Per-field metadata for six-field cron expressions
//!
//! ```text
//! ┌───────────── second (0-59)
//! │ ┌───────────── minute (0-59)
//! │ │ ┌───────────── hour (0-23)
//! │ │ │ ┌───────────── day of month (1-31)
//! │ │ │ │ ┌───────────── month (1-12 or jan-dec)
//! │ │ │ │ │ ┌───────────── day of week (0-6 or sun-sat, 0=Sunday)
//! │ │ │ │ │ │
//! * * * * * *
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Month names, lowercase, mapped to 1-12
const MONTH_NAMES: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Weekday names, lowercase, mapped to 0-6 (Sunday first)
const WEEKDAY_NAMES: &[(&str, u32)] = &[
    ("sun", 0),
    ("mon", 1),
    ("tue", 2),
    ("wed", 3),
    ("thu", 4),
    ("fri", 5),
    ("sat", 6),
];

/// One of the six schedule dimensions, in expression order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    WeekDay,
}

/// Inclusive numeric bounds of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: u32,
    pub max: u32,
}

impl FieldRange {
    /// Check whether `value` lies within the bounds
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.min, self.max)
    }
}

impl FieldKind {
    /// All fields in the order they appear in an expression
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Second,
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::Day,
        FieldKind::Month,
        FieldKind::WeekDay,
    ];

    /// Zero-based position within the expression
    pub fn position(self) -> usize {
        self as usize
    }

    /// Allowed values for this field
    pub fn range(self) -> FieldRange {
        let (min, max) = match self {
            FieldKind::Second | FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::Day => (1, 31),
            FieldKind::Month => (1, 12),
            FieldKind::WeekDay => (0, 6),
        };
        FieldRange { min, max }
    }

    /// Name table for fields that accept three-letter names
    pub fn names(self) -> Option<&'static [(&'static str, u32)]> {
        match self {
            FieldKind::Month => Some(MONTH_NAMES),
            FieldKind::WeekDay => Some(WEEKDAY_NAMES),
            _ => None,
        }
    }

    /// Look up a name token, ignoring case
    ///
    /// Returns `None` for fields without a name table and for unknown names.
    pub fn resolve_name(self, token: &str) -> Option<u32> {
        self.names()?
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|&(_, value)| value)
    }

    /// Field name as used in error messages
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Second => "second",
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::Day => "day",
            FieldKind::Month => "month",
            FieldKind::WeekDay => "weekday",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a single value token (name or decimal literal) without range checks
///
/// Returns `None` when the token is neither a known name nor an
/// all-digit literal that fits in `u32`.
pub(crate) fn resolve_value(token: &str, kind: FieldKind) -> Option<u32> {
    if let Some(value) = kind.resolve_name(token) {
        return Some(value);
    }
    if is_all_digits(token) {
        token.parse().ok()
    } else {
        None
    }
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
