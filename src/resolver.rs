//! Next-run resolution
//!
//! Finds the earliest instant strictly after a reference that satisfies a
//! [`ScheduleSet`]. Instead of scanning second by second, each rejected
//! candidate is advanced by carrying into the coarsest field that can
//! still move, resetting every finer field to its smallest permitted
//! value.

use crate::error::{CronError, Result};
use crate::field::FieldKind;
use crate::schedule::ScheduleSet;
use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

/// Iteration ceiling: four years' worth of seconds
pub const MAX_ITERATIONS: u64 = 4 * 365 * 24 * 60 * 60;

/// Longest run of years without a February 29th (e.g. 2096 to 2104)
const LEAP_YEAR_GAP: i32 = 8;

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum number of candidates tested before giving up
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

fn default_max_iterations() -> u64 {
    MAX_ITERATIONS
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl ResolverConfig {
    /// Load settings from a JSON document; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CronError::Config(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Computes next runs for one schedule
#[derive(Debug, Clone)]
pub struct NextRunResolver<'a> {
    schedule: &'a ScheduleSet,
    config: ResolverConfig,
}

impl<'a> NextRunResolver<'a> {
    /// Create a resolver with the default iteration ceiling
    pub fn new(schedule: &'a ScheduleSet) -> Self {
        Self {
            schedule,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with explicit settings
    pub fn with_config(schedule: &'a ScheduleSet, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { schedule, config })
    }

    /// Earliest matching instant strictly after `from`
    ///
    /// Sub-second precision of `from` is dropped. Fails with
    /// [`CronError::NoNextRun`] when the schedule's day/month combination
    /// can never occur or when the iteration ceiling is exhausted.
    pub fn next_run(&self, from: NaiveDateTime) -> Result<NaiveDateTime> {
        let from = from.with_nanosecond(0).unwrap_or(from);

        if !self.has_reachable_date() {
            tracing::warn!(%from, "Schedule day/month combination never occurs");
            return Err(CronError::NoNextRun { from, iterations: 0 });
        }

        let mut candidate = from
            .checked_add_signed(Duration::seconds(1))
            .ok_or(CronError::NoNextRun { from, iterations: 0 })?;

        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            iterations += 1;

            if self.schedule.matches(&candidate) {
                tracing::debug!(%from, next = %candidate, iterations, "Resolved next run");
                return Ok(candidate);
            }

            match self.next_candidate(candidate) {
                Some(next) => candidate = next,
                None => break,
            }
        }

        tracing::warn!(%from, iterations, "No next run found");
        Err(CronError::NoNextRun { from, iterations })
    }

    /// Next run after a UTC instant, computed on UTC civil time
    pub fn next_after(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let next = self.next_run(after.naive_utc())?;
        Ok(Utc.from_utc_datetime(&next))
    }

    /// Next run after the current time (UTC)
    pub fn next_from_now(&self) -> Result<DateTime<Utc>> {
        self.next_after(Utc::now())
    }

    /// Successive runs after `from`
    pub fn upcoming(&self, from: NaiveDateTime) -> Upcoming<'a> {
        Upcoming {
            resolver: self.clone(),
            cursor: Some(from),
        }
    }

    /// Advance a rejected candidate by carrying into the coarsest movable field
    ///
    /// The cascade starts at the coarsest field the candidate violates; a
    /// rejected weekday rejects the whole day. Returns `None` only when the
    /// calendar runs out of representable dates.
    fn next_candidate(&self, candidate: NaiveDateTime) -> Option<NaiveDateTime> {
        let s = self.schedule;
        let (year, month, day) = (candidate.year(), candidate.month(), candidate.day());
        let (hour, minute, second) = (candidate.hour(), candidate.minute(), candidate.second());
        let weekday = candidate.weekday().num_days_from_sunday();

        let start = if !s.contains(FieldKind::Month, month) {
            FieldKind::Month
        } else if !s.contains(FieldKind::Day, day) || !s.contains(FieldKind::WeekDay, weekday) {
            FieldKind::Day
        } else if !s.contains(FieldKind::Hour, hour) {
            FieldKind::Hour
        } else if !s.contains(FieldKind::Minute, minute) {
            FieldKind::Minute
        } else {
            FieldKind::Second
        };

        let date = candidate.date();
        let first_second = s.first(FieldKind::Second);
        let first_minute = s.first(FieldKind::Minute);

        if start <= FieldKind::Second {
            if let Some(next) = s.next_after_value(FieldKind::Second, second) {
                tracing::trace!(second = next, "Carry into second");
                return date.and_hms_opt(hour, minute, next);
            }
        }

        if start <= FieldKind::Minute {
            if let Some(next) = s.next_after_value(FieldKind::Minute, minute) {
                tracing::trace!(minute = next, "Carry into minute");
                return date.and_hms_opt(hour, next, first_second);
            }
        }

        if start <= FieldKind::Hour {
            if let Some(next) = s.next_after_value(FieldKind::Hour, hour) {
                tracing::trace!(hour = next, "Carry into hour");
                return date.and_hms_opt(next, first_minute, first_second);
            }
        }

        let first_time = self.first_time()?;

        if start <= FieldKind::Day {
            let next = s
                .next_after_value(FieldKind::Day, day)
                .filter(|&d| d <= days_in_month(year, month));
            if let Some(next) = next {
                tracing::trace!(day = next, "Carry into day");
                return Some(NaiveDate::from_ymd_opt(year, month, next)?.and_time(first_time));
            }
        }

        let next_month = s
            .values(FieldKind::Month)
            .range(month + 1..)
            .find_map(|&m| self.first_day_in(year, m).map(|d| (m, d)));
        if let Some((next, d)) = next_month {
            tracing::trace!(month = next, day = d, "Carry into month");
            return Some(NaiveDate::from_ymd_opt(year, next, d)?.and_time(first_time));
        }

        for next_year in (year + 1)..=(year + LEAP_YEAR_GAP) {
            let first = s
                .values(FieldKind::Month)
                .iter()
                .find_map(|&m| self.first_day_in(next_year, m).map(|d| (m, d)));
            if let Some((m, d)) = first {
                tracing::trace!(year = next_year, month = m, day = d, "Carry into year");
                return Some(NaiveDate::from_ymd_opt(next_year, m, d)?.and_time(first_time));
            }
        }

        None
    }

    /// Earliest permitted time of day
    fn first_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(
            self.schedule.first(FieldKind::Hour),
            self.schedule.first(FieldKind::Minute),
            self.schedule.first(FieldKind::Second),
        )
    }

    /// Smallest permitted day that exists in the given month
    fn first_day_in(&self, year: i32, month: u32) -> Option<u32> {
        let day = self.schedule.first(FieldKind::Day);
        (day <= days_in_month(year, month)).then_some(day)
    }

    /// Whether any permitted (month, day) pair exists in some year
    fn has_reachable_date(&self) -> bool {
        let day = self.schedule.first(FieldKind::Day);
        self.schedule
            .values(FieldKind::Month)
            .iter()
            .any(|&m| day <= max_days_in_month(m))
    }
}

/// Iterator over successive next runs
#[derive(Debug, Clone)]
pub struct Upcoming<'a> {
    resolver: NextRunResolver<'a>,
    cursor: Option<NaiveDateTime>,
}

impl Iterator for Upcoming<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor.take()?;
        let next = self.resolver.next_run(from).ok()?;
        self.cursor = Some(next);
        Some(next)
    }
}

/// Earliest matching instant strictly after `from`, with default settings
pub fn next_run(schedule: &ScheduleSet, from: NaiveDateTime) -> Result<NaiveDateTime> {
    NextRunResolver::new(schedule).next_run(from)
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn max_days_in_month(month: u32) -> u32 {
    days_in_month(2000, month)
}
