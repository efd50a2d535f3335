//! Schedule integration tests
//!
//! End-to-end tests exercising validation, expansion, matching and
//! next-run resolution through the public API, including concurrent use
//! of one shared schedule.

use a3s_cronexpr::{
    is_valid, next_run, parse, validate, CronError, CronExpression, FieldKind, NextRunResolver,
    ResolverConfig, SyntaxError,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::sync::Arc;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

const EXPRESSIONS: &[&str] = &[
    "* * * * * *",
    "*/30 * * * * *",
    "0 0 9 * * mon-fri",
    "0 15,45 6-18/3 * * *",
    "10/20 5 4 1-7 * sun",
    "0 0 0 29 feb *",
    "59 59 23 31 dec sat",
    "0 0 12 1,15 jan-jun,oct *",
];

// ─── Validation ──────────────────────────────────────────────────

#[test]
fn test_is_valid_scenarios() {
    assert!(is_valid("0 0 9 * jan-dec mon-fri"));
    assert!(!is_valid("0 0 9 * * 8"));
    assert!(!is_valid("* * * * * ,"));
}

#[test]
fn test_validate_reports_field_and_token() {
    match validate("0 0 25 * * *") {
        Err(SyntaxError::OutOfRange { field, token, range }) => {
            assert_eq!(field, FieldKind::Hour);
            assert_eq!(token, "25");
            assert_eq!((range.min, range.max), (0, 23));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let err = validate("0 0 10-5 * * *").unwrap_err();
    assert_eq!(err.field(), Some(FieldKind::Hour));
    assert!(err.to_string().contains("10-5"));
}

#[test]
fn test_parse_rejects_inverted_range() {
    let err = parse("0 0 10-5 * * *").unwrap_err();
    assert!(matches!(
        err,
        CronError::Syntax(SyntaxError::InvertedRange { .. })
    ));
}

// ─── Expansion ───────────────────────────────────────────────────

#[test]
fn test_expanded_sets_are_non_empty_and_in_range() {
    for expr in EXPRESSIONS {
        let schedule = parse(expr).unwrap();
        for kind in FieldKind::ALL {
            let values = schedule.values(kind);
            assert!(!values.is_empty(), "{expr}: {kind} is empty");
            let range = kind.range();
            assert!(
                values.iter().all(|&v| range.contains(v)),
                "{expr}: {kind} has values outside {range}"
            );
        }
    }
}

// ─── Matching ────────────────────────────────────────────────────

#[test]
fn test_single_field_violation_never_matches() {
    // 2024-01-01 is a Monday
    let schedule = parse("30 15 9 1 jan mon").unwrap();
    let hit = at(2024, 1, 1, 9, 15, 30);
    assert!(schedule.matches(&hit));

    let misses = [
        at(2024, 1, 1, 9, 15, 31),
        at(2024, 1, 1, 9, 16, 30),
        at(2024, 1, 1, 10, 15, 30),
        at(2024, 1, 2, 9, 15, 30),
        at(2024, 2, 1, 9, 15, 30),
        // 2029-01-01 is a Monday too, 2025-01-01 is a Wednesday
        at(2025, 1, 1, 9, 15, 30),
    ];
    for miss in misses {
        assert!(!schedule.matches(&miss), "{miss} should not match");
    }
    assert!(schedule.matches(&at(2029, 1, 1, 9, 15, 30)));
}

// ─── Next Run ────────────────────────────────────────────────────

#[test]
fn test_next_run_scenarios() {
    let schedule = parse("0 0 9 * * mon-fri").unwrap();
    assert_eq!(
        next_run(&schedule, at(2024, 1, 1, 8, 0, 0)).unwrap(),
        at(2024, 1, 1, 9, 0, 0)
    );

    let schedule = parse("*/30 * * * * *").unwrap();
    assert_eq!(
        next_run(&schedule, at(2024, 6, 1, 12, 0, 0)).unwrap(),
        at(2024, 6, 1, 12, 0, 30)
    );
}

#[test]
fn test_friday_evening_rolls_to_monday() {
    // 2024-01-05 is a Friday
    let schedule = parse("0 0 9 * * mon-fri").unwrap();
    assert_eq!(
        next_run(&schedule, at(2024, 1, 5, 9, 0, 0)).unwrap(),
        at(2024, 1, 8, 9, 0, 0)
    );
}

#[test]
fn test_impossible_schedule_has_no_next_run() {
    let schedule = parse("0 0 0 31 apr,jun,sep,nov *").unwrap();
    let err = next_run(&schedule, at(2024, 1, 1, 0, 0, 0)).unwrap_err();
    match err {
        CronError::NoNextRun { from, iterations } => {
            assert_eq!(from, at(2024, 1, 1, 0, 0, 0));
            assert!(iterations <= ResolverConfig::default().max_iterations);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_next_run_is_strictly_later_and_matches() {
    let references = [
        at(2024, 1, 1, 0, 0, 0),
        at(2024, 2, 28, 23, 59, 59),
        at(2024, 12, 31, 23, 59, 59),
        at(2025, 6, 15, 12, 34, 56),
    ];

    for expr in EXPRESSIONS {
        let schedule = parse(expr).unwrap();
        for from in references {
            let next = next_run(&schedule, from).unwrap();
            assert!(next > from, "{expr} from {from}: got {next}");
            assert!(schedule.matches(&next), "{expr} from {from}: {next}");
        }
    }
}

#[test]
fn test_next_run_skips_nothing() {
    // Compare against a plain second-by-second scan over two days
    let schedule = parse("0 15,45 6-18/3 * * *").unwrap();
    let from = at(2024, 3, 9, 17, 0, 0);

    let mut scan = from + Duration::seconds(1);
    while !schedule.matches(&scan) {
        scan += Duration::seconds(1);
    }
    assert_eq!(next_run(&schedule, from).unwrap(), scan);
}

#[test]
fn test_carry_resets_finer_fields_to_minimum() {
    let schedule = parse("20,40 15,45 8,20 * * *").unwrap();
    let next = next_run(&schedule, at(2024, 5, 5, 20, 45, 40)).unwrap();
    assert_eq!(next, at(2024, 5, 6, 8, 15, 20));
    assert_eq!(next.hour(), 8);
    assert_eq!(next.minute(), 15);
    assert_eq!(next.second(), 20);
}

#[test]
fn test_upcoming_runs_increase() {
    let expr = CronExpression::parse("0 0 0 29 feb *").unwrap();
    let years: Vec<i32> = expr
        .upcoming(at(2024, 1, 1, 0, 0, 0))
        .take(4)
        .map(|dt| dt.year())
        .collect();
    assert_eq!(years, vec![2024, 2028, 2032, 2036]);
}

#[test]
fn test_custom_iteration_ceiling() {
    // 2024-01-01 is a Monday; each rejected weekday costs one iteration
    let schedule = parse("* * * * * sun").unwrap();

    let config = ResolverConfig::from_json(r#"{"max_iterations": 7}"#).unwrap();
    let resolver = NextRunResolver::with_config(&schedule, config).unwrap();
    assert_eq!(
        resolver.next_run(at(2024, 1, 1, 0, 0, 0)).unwrap(),
        at(2024, 1, 7, 0, 0, 0)
    );

    let config = ResolverConfig::default().with_max_iterations(6);
    let resolver = NextRunResolver::with_config(&schedule, config).unwrap();
    assert!(matches!(
        resolver.next_run(at(2024, 1, 1, 0, 0, 0)),
        Err(CronError::NoNextRun { iterations: 6, .. })
    ));
}

// ─── Concurrency ─────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_resolution_on_shared_schedule() {
    let schedule = Arc::new(parse("0 */10 * * * *").unwrap());
    let mut handles = Vec::new();

    for hour in 0..8 {
        let schedule = Arc::clone(&schedule);
        handles.push(tokio::task::spawn_blocking(move || {
            let from = at(2024, 7, 1, hour, 5, 0);
            (hour, next_run(&schedule, from).unwrap())
        }));
    }

    for handle in handles {
        let (hour, next) = handle.await.unwrap();
        assert_eq!(next, at(2024, 7, 1, hour, 10, 0));
    }
}
