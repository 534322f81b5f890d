//! Tests for timescale partitioning.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use pl_core::date_time_range::DateTimeRange;
use pl_time::timescale::tick;
use pl_time::{TimescalePartitioner, TimescaleUnit};
use proptest::prelude::*;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn anchor() -> NaiveDateTime {
    dt(2023, 6, 22, 9, 0)
}

fn render(range: &DateTimeRange) -> String {
    let f = "%d/%m/%Y %H:%M:%S%.3f";
    format!(
        "{} {}",
        range.start.unwrap().format(f),
        range.end.unwrap().format(f)
    )
}

fn check_timescale(partitioner: &TimescalePartitioner, unit: TimescaleUnit, expected: &[&str]) {
    let result = partitioner.create_timescale(anchor(), unit, expected.len());
    let actual: Vec<String> = result.iter().map(render).collect();
    assert_eq!(actual, expected, "{unit} timescale");
}

// ───────────────────────── fixed units ─────────────────────────

#[test]
fn test_minutes() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Minutes,
        &[
            "22/06/2023 00:00:00.000 22/06/2023 00:00:59.999",
            "22/06/2023 00:01:00.000 22/06/2023 00:01:59.999",
            "22/06/2023 00:02:00.000 22/06/2023 00:02:59.999",
            "22/06/2023 00:03:00.000 22/06/2023 00:03:59.999",
            "22/06/2023 00:04:00.000 22/06/2023 00:04:59.999",
        ],
    );
}

#[test]
fn test_hours() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Hours,
        &[
            "22/06/2023 00:00:00.000 22/06/2023 00:59:59.999",
            "22/06/2023 01:00:00.000 22/06/2023 01:59:59.999",
            "22/06/2023 02:00:00.000 22/06/2023 02:59:59.999",
            "22/06/2023 03:00:00.000 22/06/2023 03:59:59.999",
            "22/06/2023 04:00:00.000 22/06/2023 04:59:59.999",
        ],
    );
}

#[test]
fn test_days() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Days,
        &[
            "22/06/2023 00:00:00.000 22/06/2023 23:59:59.999",
            "23/06/2023 00:00:00.000 23/06/2023 23:59:59.999",
            "24/06/2023 00:00:00.000 24/06/2023 23:59:59.999",
            "25/06/2023 00:00:00.000 25/06/2023 23:59:59.999",
            "26/06/2023 00:00:00.000 26/06/2023 23:59:59.999",
        ],
    );
}

// ───────────────────────── weeks ─────────────────────────

#[test]
fn test_weeks() {
    let cases: [(Weekday, [&str; 2]); 7] = [
        (
            Weekday::Sun,
            [
                "25/06/2023 00:00:00.000 01/07/2023 23:59:59.999",
                "02/07/2023 00:00:00.000 08/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Mon,
            [
                "19/06/2023 00:00:00.000 25/06/2023 23:59:59.999",
                "26/06/2023 00:00:00.000 02/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Tue,
            [
                "20/06/2023 00:00:00.000 26/06/2023 23:59:59.999",
                "27/06/2023 00:00:00.000 03/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Wed,
            [
                "21/06/2023 00:00:00.000 27/06/2023 23:59:59.999",
                "28/06/2023 00:00:00.000 04/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Thu,
            [
                "22/06/2023 00:00:00.000 28/06/2023 23:59:59.999",
                "29/06/2023 00:00:00.000 05/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Fri,
            [
                "23/06/2023 00:00:00.000 29/06/2023 23:59:59.999",
                "30/06/2023 00:00:00.000 06/07/2023 23:59:59.999",
            ],
        ),
        (
            Weekday::Sat,
            [
                "24/06/2023 00:00:00.000 30/06/2023 23:59:59.999",
                "01/07/2023 00:00:00.000 07/07/2023 23:59:59.999",
            ],
        ),
    ];
    let mut partitioner = TimescalePartitioner::new();
    for (day, expected) in cases {
        partitioner.set_week_start_day(day);
        check_timescale(&partitioner, TimescaleUnit::Weeks, &expected);
    }
}

// ───────────────────────── calendar units ─────────────────────────

#[test]
fn test_thirds_of_months() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::ThirdsOfMonths,
        &[
            "01/06/2023 00:00:00.000 10/06/2023 23:59:59.999",
            "11/06/2023 00:00:00.000 20/06/2023 23:59:59.999",
            "21/06/2023 00:00:00.000 30/06/2023 23:59:59.999",
            "01/07/2023 00:00:00.000 10/07/2023 23:59:59.999",
            "11/07/2023 00:00:00.000 20/07/2023 23:59:59.999",
        ],
    );
}

#[test]
fn test_months() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Months,
        &[
            "01/06/2023 00:00:00.000 30/06/2023 23:59:59.999",
            "01/07/2023 00:00:00.000 31/07/2023 23:59:59.999",
            "01/08/2023 00:00:00.000 31/08/2023 23:59:59.999",
            "01/09/2023 00:00:00.000 30/09/2023 23:59:59.999",
            "01/10/2023 00:00:00.000 31/10/2023 23:59:59.999",
        ],
    );
}

#[test]
fn test_quarters() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Quarters,
        &[
            "01/04/2023 00:00:00.000 30/06/2023 23:59:59.999",
            "01/07/2023 00:00:00.000 30/09/2023 23:59:59.999",
            "01/10/2023 00:00:00.000 31/12/2023 23:59:59.999",
            "01/01/2024 00:00:00.000 31/03/2024 23:59:59.999",
            "01/04/2024 00:00:00.000 30/06/2024 23:59:59.999",
        ],
    );
}

#[test]
fn test_half_years() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::HalfYears,
        &[
            "01/01/2023 00:00:00.000 30/06/2023 23:59:59.999",
            "01/07/2023 00:00:00.000 31/12/2023 23:59:59.999",
            "01/01/2024 00:00:00.000 30/06/2024 23:59:59.999",
            "01/07/2024 00:00:00.000 31/12/2024 23:59:59.999",
            "01/01/2025 00:00:00.000 30/06/2025 23:59:59.999",
        ],
    );
}

#[test]
fn test_years() {
    check_timescale(
        &TimescalePartitioner::new(),
        TimescaleUnit::Years,
        &[
            "01/01/2023 00:00:00.000 31/12/2023 23:59:59.999",
            "01/01/2024 00:00:00.000 31/12/2024 23:59:59.999",
            "01/01/2025 00:00:00.000 31/12/2025 23:59:59.999",
            "01/01/2026 00:00:00.000 31/12/2026 23:59:59.999",
            "01/01/2027 00:00:00.000 31/12/2027 23:59:59.999",
        ],
    );
}

// ───────────────────────── properties ─────────────────────────

fn unit_strategy() -> impl Strategy<Value = TimescaleUnit> {
    (0usize..TimescaleUnit::ALL.len()).prop_map(|i| TimescaleUnit::ALL[i])
}

proptest! {
    #[test]
    fn prop_buckets_are_contiguous(
        y in 1990i32..2060,
        m in 1u32..=12,
        d in 1u32..=28,
        h in 0u32..24,
        unit in unit_strategy(),
        week_start in 0u32..7,
        count in 0usize..40,
    ) {
        let anchor = dt(y, m, d, h, 0);
        let day = NaiveDate::from_ymd_opt(2023, 6, 19 + week_start).unwrap();
        let partitioner = TimescalePartitioner::with_week_start_day(chrono::Datelike::weekday(&day));
        let buckets = partitioner.create_timescale(anchor, unit, count);

        prop_assert_eq!(buckets.len(), count);
        for bucket in &buckets {
            prop_assert!(bucket.start.unwrap() <= bucket.end.unwrap());
        }
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].end.unwrap() + tick(), pair[1].start.unwrap());
        }
    }
}
