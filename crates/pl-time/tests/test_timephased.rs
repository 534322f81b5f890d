//! Tests for redistributing timephased work across buckets.

use chrono::{NaiveDate, NaiveDateTime};
use pl_core::date_time_range::DateTimeRange;
use pl_core::errors::Error;
use pl_time::{
    segment_work, segment_work_timescale, Duration, ProjectCalendar, TimeUnit, TimephasedWork,
    TimescalePartitioner, TimescaleUnit,
};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Buckets on 2026-01-28 given as `(from_hour, to_hour)`, 24 meaning midnight.
fn hours(spans: &[(u32, u32)]) -> Vec<DateTimeRange> {
    spans
        .iter()
        .map(|&(from, to)| {
            let end = if to == 24 {
                dt(2026, 1, 29, 0, 0)
            } else {
                dt(2026, 1, 28, to, 0)
            };
            DateTimeRange::new(dt(2026, 1, 28, from, 0), end)
        })
        .collect()
}

fn work(from: u32, to: u32, amount: Duration) -> TimephasedWork {
    TimephasedWork::new(dt(2026, 1, 28, from, 0), dt(2026, 1, 28, to, 0), amount)
}

fn minutes(values: &[f64]) -> Vec<Duration> {
    values.iter().map(|v| Duration::minutes(*v)).collect()
}

fn check_segments(items: &[TimephasedWork], buckets: &[(u32, u32)], expected: &[f64]) {
    let cal = ProjectCalendar::with_default_hours("Standard");
    let result = segment_work(&cal.view(), items, &hours(buckets), TimeUnit::Minutes).unwrap();
    assert_eq!(result, minutes(expected), "buckets {buckets:?}");
}

// ───────────────────────── single item ─────────────────────────

#[test]
fn test_no_work() {
    check_segments(&[], &[(6, 7), (7, 8)], &[0.0, 0.0]);
}

#[test]
fn test_single_item() {
    let items = [work(8, 17, Duration::hours(8.0))];
    let cal = ProjectCalendar::with_default_hours("Standard");

    // Buckets on the previous day see nothing
    let earlier = [
        DateTimeRange::new(dt(2026, 1, 27, 6, 0), dt(2026, 1, 27, 7, 0)),
        DateTimeRange::new(dt(2026, 1, 27, 7, 0), dt(2026, 1, 27, 8, 0)),
    ];
    assert_eq!(
        segment_work(&cal.view(), &items, &earlier, TimeUnit::Minutes).unwrap(),
        minutes(&[0.0, 0.0])
    );

    let cases: [((u32, u32), f64); 12] = [
        ((7, 9), 60.0),
        ((8, 9), 60.0),
        ((8, 10), 120.0),
        ((9, 10), 60.0),
        ((9, 11), 120.0),
        ((11, 13), 60.0),
        ((12, 13), 0.0),
        ((12, 14), 60.0),
        ((8, 17), 480.0),
        ((16, 17), 60.0),
        ((15, 17), 120.0),
        ((16, 18), 60.0),
    ];
    for (bucket, expected) in cases {
        check_segments(&items, &[bucket], &[expected]);
    }
}

#[test]
fn test_bucket_inside_lunch_break() {
    let items = [work(8, 17, Duration::hours(8.0))];
    let cal = ProjectCalendar::with_default_hours("Standard");
    let bucket = [DateTimeRange::new(dt(2026, 1, 28, 12, 15), dt(2026, 1, 28, 12, 45))];
    assert_eq!(
        segment_work(&cal.view(), &items, &bucket, TimeUnit::Minutes).unwrap(),
        minutes(&[0.0])
    );
}

#[test]
fn test_hourly_buckets() {
    let items = [work(8, 17, Duration::hours(8.0))];
    let buckets: Vec<(u32, u32)> = (7..18).map(|h| (h, h + 1)).collect();
    check_segments(
        &items,
        &buckets,
        &[0.0, 60.0, 60.0, 60.0, 60.0, 0.0, 60.0, 60.0, 60.0, 60.0, 0.0],
    );
}

// ───────────────────────── multiple items ─────────────────────────

#[test]
fn test_multiple_items() {
    let items = [
        work(8, 10, Duration::hours(2.0)),
        work(10, 12, Duration::hours(1.0)),
        work(13, 15, Duration::hours(2.0)),
        work(15, 17, Duration::hours(1.0)),
    ];
    check_segments(&items, &[(0, 12)], &[180.0]);
    check_segments(&items, &[(12, 24)], &[180.0]);
    check_segments(&items, &[(0, 24)], &[360.0]);
    check_segments(&items, &[(0, 12), (12, 24)], &[180.0, 180.0]);
}

#[test]
fn test_work_in_non_working_time() {
    let items = [
        work(7, 8, Duration::hours(1.0)),
        work(8, 17, Duration::hours(8.0)),
    ];
    check_segments(&items, &[(6, 7), (7, 8), (8, 9), (9, 10)], &[0.0, 60.0, 60.0, 60.0]);
}

#[test]
fn test_zero_work_item() {
    let items = [
        work(8, 9, Duration::hours(0.0)),
        work(9, 17, Duration::hours(7.0)),
    ];
    check_segments(&items, &[(6, 7), (7, 8), (8, 9), (9, 10)], &[0.0, 0.0, 0.0, 60.0]);
}

#[test]
fn test_result_unit() {
    let cal = ProjectCalendar::with_default_hours("Standard");
    let items = [work(8, 17, Duration::hours(8.0))];
    let result = segment_work(&cal.view(), &items, &hours(&[(0, 12)]), TimeUnit::Days).unwrap();
    assert_eq!(result, vec![Duration::days(0.5)]);
}

#[test]
fn test_overlapping_items_rejected() {
    let cal = ProjectCalendar::with_default_hours("Standard");
    let items = [
        work(8, 12, Duration::hours(4.0)),
        work(11, 17, Duration::hours(5.0)),
    ];
    assert!(matches!(
        segment_work(&cal.view(), &items, &hours(&[(0, 24)]), TimeUnit::Hours),
        Err(Error::UnorderedRanges(_))
    ));
}

// ───────────────────────── timescale ─────────────────────────

#[test]
fn test_segment_over_timescale() {
    let cal = ProjectCalendar::with_default_hours("Standard");
    let items = [work(8, 17, Duration::hours(8.0))];
    let result = segment_work_timescale(
        &cal.view(),
        &items,
        &TimescalePartitioner::new(),
        dt(2026, 1, 28, 9, 30),
        TimescaleUnit::Hours,
        24,
        TimeUnit::Minutes,
    )
    .unwrap();
    assert_eq!(result.len(), 24);
    let mut expected = vec![0.0; 24];
    for h in [8, 9, 10, 11, 13, 14, 15, 16] {
        expected[h] = 60.0;
    }
    assert_eq!(result, minutes(&expected));

    let result = segment_work_timescale(
        &cal.view(),
        &items,
        &TimescalePartitioner::new(),
        dt(2026, 1, 28, 9, 30),
        TimescaleUnit::Days,
        2,
        TimeUnit::Hours,
    )
    .unwrap();
    assert_eq!(result, vec![Duration::hours(8.0), Duration::hours(0.0)]);
}

#[test]
fn test_timescale_count_mismatch() {
    let cal = ProjectCalendar::with_default_hours("Standard");
    let anchor = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(
        segment_work_timescale(
            &cal.view(),
            &[],
            &TimescalePartitioner::new(),
            anchor,
            TimescaleUnit::Years,
            5,
            TimeUnit::Hours,
        ),
        Err(Error::BucketCountMismatch {
            expected: 5,
            actual: 0
        })
    );
}
