//! # a3s-cronexpr
//!
//! Six-field cron expression parsing, matching, and next-run resolution for
//! the A3S ecosystem.
//!
//! ## Overview
//!
//! An expression has six whitespace-separated fields: second, minute, hour,
//! day of month, month, and weekday. Each field is a comma-separated list of
//! `*`, a value, or a `start-end` range, optionally followed by `/step`.
//! Months and weekdays also accept three-letter names (`jan`, `mon`, ...).
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_cronexpr::{is_valid, next_run, parse};
//! use chrono::NaiveDate;
//!
//! # fn example() -> a3s_cronexpr::Result<()> {
//! assert!(is_valid("0 0 9 * jan-dec mon-fri"));
//!
//! let schedule = parse("0 0 9 * * mon-fri")?;
//! let from = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(8, 0, 0)
//!     .unwrap();
//!
//! let next = next_run(&schedule, from)?;
//! assert_eq!(next.to_string(), "2024-01-01 09:00:00");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **validator** — grammar check of a raw expression (`validate`, `is_valid`)
//! - **expander** — one field's text to its set of values (`expand`)
//! - **schedule** — the six expanded sets and instant matching (`parse`, `matches`)
//! - **resolver** — cascading next-run search bounded by an iteration ceiling
//! - **expression** — `CronExpression`, a parsed expression with its source text

pub mod error;
pub mod expander;
pub mod expression;
pub mod field;
pub mod resolver;
pub mod schedule;
pub mod validator;

// Re-export core types
pub use error::{CronError, ExpansionError, Result, SyntaxError};
pub use expander::expand;
pub use expression::CronExpression;
pub use field::{FieldKind, FieldRange};
pub use resolver::{next_run, NextRunResolver, ResolverConfig, Upcoming, MAX_ITERATIONS};
pub use schedule::{matches, parse, ScheduleSet};
pub use validator::{is_valid, validate};
