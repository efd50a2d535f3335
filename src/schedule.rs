//! Expanded schedules and instant matching

use crate::error::Result;
use crate::expander::expand;
use crate::field::FieldKind;
use crate::validator::validate;
use chrono::{Datelike, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/// The six expanded value sets of one expression
///
/// Every set is non-empty and lies within its field's range. A
/// `ScheduleSet` can only be built by [`parse`], so both invariants hold
/// for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSet {
    /// Allowed seconds (0-59)
    seconds: BTreeSet<u32>,
    /// Allowed minutes (0-59)
    minutes: BTreeSet<u32>,
    /// Allowed hours (0-23)
    hours: BTreeSet<u32>,
    /// Allowed days of month (1-31)
    days: BTreeSet<u32>,
    /// Allowed months (1-12)
    months: BTreeSet<u32>,
    /// Allowed days of week (0-6, 0=Sunday)
    weekdays: BTreeSet<u32>,
}

/// Validate and expand an expression into a [`ScheduleSet`]
///
/// # Examples
///
/// ```
/// use a3s_cronexpr::{parse, FieldKind};
///
/// let schedule = parse("0 */15 9-17 * * mon-fri").unwrap();
/// assert_eq!(schedule.values(FieldKind::Minute).len(), 4);
/// assert!(parse("0 0 9 * * 8").is_err());
/// ```
pub fn parse(expression: &str) -> Result<ScheduleSet> {
    validate(expression)?;

    let fields: Vec<&str> = expression.split_whitespace().collect();
    let schedule = ScheduleSet {
        seconds: expand(fields[0], FieldKind::Second)?,
        minutes: expand(fields[1], FieldKind::Minute)?,
        hours: expand(fields[2], FieldKind::Hour)?,
        days: expand(fields[3], FieldKind::Day)?,
        months: expand(fields[4], FieldKind::Month)?,
        weekdays: expand(fields[5], FieldKind::WeekDay)?,
    };

    tracing::debug!(expression = expression.trim(), "Parsed cron expression");
    Ok(schedule)
}

/// Check whether `instant` satisfies every field of `schedule`
pub fn matches<T: Datelike + Timelike>(schedule: &ScheduleSet, instant: &T) -> bool {
    schedule.matches(instant)
}

impl ScheduleSet {
    /// Values permitted for `kind`, ascending
    pub fn values(&self, kind: FieldKind) -> &BTreeSet<u32> {
        match kind {
            FieldKind::Second => &self.seconds,
            FieldKind::Minute => &self.minutes,
            FieldKind::Hour => &self.hours,
            FieldKind::Day => &self.days,
            FieldKind::Month => &self.months,
            FieldKind::WeekDay => &self.weekdays,
        }
    }

    /// Smallest permitted value for `kind`
    pub fn first(&self, kind: FieldKind) -> u32 {
        // Sets are never empty; the fallback is the field minimum
        self.values(kind)
            .first()
            .copied()
            .unwrap_or_else(|| kind.range().min)
    }

    /// Smallest permitted value for `kind` strictly greater than `current`
    pub fn next_after_value(&self, kind: FieldKind, current: u32) -> Option<u32> {
        self.values(kind)
            .range((Excluded(current), Unbounded))
            .next()
            .copied()
    }

    /// Check whether `value` is permitted for `kind`
    pub fn contains(&self, kind: FieldKind, value: u32) -> bool {
        self.values(kind).contains(&value)
    }

    /// Check if a datetime matches every field
    pub fn matches<T: Datelike + Timelike>(&self, instant: &T) -> bool {
        let second = self.seconds.contains(&instant.second());
        let minute = self.minutes.contains(&instant.minute());
        let hour = self.hours.contains(&instant.hour());
        let day = self.days.contains(&instant.day());
        let month = self.months.contains(&instant.month());
        let weekday = self
            .weekdays
            .contains(&instant.weekday().num_days_from_sunday());

        second && minute && hour && day && month && weekday
    }
}
