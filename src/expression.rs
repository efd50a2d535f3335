//! Parsed cron expression keeping its source text

use crate::error::{CronError, Result};
use crate::resolver::{NextRunResolver, Upcoming};
use crate::schedule::{parse, ScheduleSet};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed six-field cron expression
///
/// Serializes as its expression string and re-parses on deserialization,
/// so a deserialized value always satisfies the same invariants as one
/// built with [`CronExpression::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CronExpression {
    /// Original expression string, trimmed
    expression: String,
    schedule: ScheduleSet,
}

impl CronExpression {
    /// Parse a cron expression string
    ///
    /// # Examples
    ///
    /// ```
    /// use a3s_cronexpr::CronExpression;
    ///
    /// // Every 5 seconds
    /// let expr = CronExpression::parse("*/5 * * * * *").unwrap();
    ///
    /// // Every day at 2:30 AM
    /// let expr = CronExpression::parse("0 30 2 * * *").unwrap();
    ///
    /// // Every Monday at 9 AM
    /// let expr = CronExpression::parse("0 0 9 * * mon").unwrap();
    /// ```
    pub fn parse(expression: &str) -> Result<Self> {
        let schedule = parse(expression)?;
        Ok(Self {
            expression: expression.trim().to_string(),
            schedule,
        })
    }

    /// Source text as given (trimmed, otherwise untouched)
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Expanded field sets
    pub fn schedule(&self) -> &ScheduleSet {
        &self.schedule
    }

    /// Check if a datetime matches this expression
    pub fn matches<T: Datelike + Timelike>(&self, instant: &T) -> bool {
        self.schedule.matches(instant)
    }

    /// Next matching instant strictly after `from`
    pub fn next_run(&self, from: NaiveDateTime) -> Result<NaiveDateTime> {
        NextRunResolver::new(&self.schedule).next_run(from)
    }

    /// Next matching instant strictly after a UTC datetime
    pub fn next_after(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>> {
        NextRunResolver::new(&self.schedule).next_after(after)
    }

    /// Successive matching instants after `from`
    pub fn upcoming(&self, from: NaiveDateTime) -> Upcoming<'_> {
        NextRunResolver::new(&self.schedule).upcoming(from)
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CronExpression {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CronExpression> for String {
    fn from(expr: CronExpression) -> Self {
        expr.expression
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
