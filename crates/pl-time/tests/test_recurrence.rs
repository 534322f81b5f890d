//! Recurrence expansion tests.
//!
//! Each case expands three occurrences and then checks that expanding up to
//! the last generated date yields the same sequence.

use chrono::{Datelike, NaiveDate, Weekday};
use pl_time::recurrence::{RecurrenceType, RecurringData, RecurringDataBuilder, Termination};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn three(kind: RecurrenceType, start: NaiveDate) -> RecurringDataBuilder {
    RecurringDataBuilder::new(kind, start, Termination::Occurrences(3))
}

/// Assert the expansion, then the same expansion terminated by finish date.
fn check_dates(data: &RecurringData, expected: &[NaiveDate]) {
    let actual = data.dates();
    assert_eq!(actual, expected, "occurrence-count expansion of {data}");
    let last = *expected.last().unwrap();
    let by_finish = data.with_termination(Termination::FinishDate(last)).dates();
    assert_eq!(by_finish, expected, "finish-date expansion of {data}");
}

// ───────────────────────── daily ─────────────────────────

#[test]
fn test_daily() {
    let data = three(RecurrenceType::Daily, date(2017, 11, 1))
        .frequency(2)
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 1), date(2017, 11, 3), date(2017, 11, 5)]);
}

#[test]
fn test_daily_working_days_custom_week() {
    // Tuesday-to-Saturday week
    let data = three(RecurrenceType::Daily, date(2017, 11, 5))
        .working_days_only(true)
        .build()
        .unwrap();
    let dates = data.dates_with(|d| !matches!(d, Weekday::Sun | Weekday::Mon));
    assert_eq!(dates, vec![date(2017, 11, 7), date(2017, 11, 8), date(2017, 11, 9)]);
}

// ───────────────────────── weekly ─────────────────────────

#[test]
fn test_weekly() {
    let start = date(2017, 11, 1);

    let data = three(RecurrenceType::Weekly, start)
        .frequency(2)
        .weekly_days(&[Weekday::Mon])
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 13), date(2017, 11, 27), date(2017, 12, 11)]);

    let data = three(RecurrenceType::Weekly, start)
        .frequency(2)
        .weekly_days(&[Weekday::Tue])
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 14), date(2017, 11, 28), date(2017, 12, 12)]);

    let data = three(RecurrenceType::Weekly, start)
        .frequency(2)
        .weekly_days(&[Weekday::Mon, Weekday::Tue])
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 13), date(2017, 11, 14), date(2017, 11, 27)]);

    let data = three(RecurrenceType::Weekly, start)
        .weekly_days(&[Weekday::Mon])
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 6), date(2017, 11, 13), date(2017, 11, 20)]);
}

// ───────────────────────── monthly relative ─────────────────────────

fn monthly_relative(start: NaiveDate, n: u32, day: Weekday, frequency: u32) -> RecurringData {
    three(RecurrenceType::Monthly, start)
        .relative(true)
        .day_number(n)
        .day_of_week(day)
        .frequency(frequency)
        .build()
        .unwrap()
}

#[test]
fn test_monthly_relative() {
    check_dates(
        &monthly_relative(date(2017, 11, 1), 1, Weekday::Mon, 1),
        &[date(2017, 11, 6), date(2017, 12, 4), date(2018, 1, 1)],
    );
    check_dates(
        &monthly_relative(date(2017, 12, 4), 1, Weekday::Mon, 1),
        &[date(2017, 12, 4), date(2018, 1, 1), date(2018, 2, 5)],
    );
    check_dates(
        &monthly_relative(date(2017, 11, 7), 1, Weekday::Mon, 1),
        &[date(2017, 12, 4), date(2018, 1, 1), date(2018, 2, 5)],
    );
    check_dates(
        &monthly_relative(date(2017, 11, 1), 3, Weekday::Wed, 2),
        &[date(2017, 11, 15), date(2018, 1, 17), date(2018, 3, 21)],
    );
    check_dates(
        &monthly_relative(date(2017, 11, 1), 5, Weekday::Mon, 1),
        &[date(2017, 11, 27), date(2017, 12, 25), date(2018, 1, 29)],
    );
}

#[test]
fn test_third_monday_from_mid_month() {
    check_dates(
        &monthly_relative(date(2008, 6, 15), 3, Weekday::Mon, 1),
        &[date(2008, 6, 16), date(2008, 7, 21), date(2008, 8, 18)],
    );
}

// ───────────────────────── monthly absolute ─────────────────────────

#[test]
fn test_monthly_absolute() {
    let start = date(2017, 11, 1);
    let data = three(RecurrenceType::Monthly, start).day_number(11).build().unwrap();
    check_dates(&data, &[date(2017, 11, 11), date(2017, 12, 11), date(2018, 1, 11)]);

    let data = three(RecurrenceType::Monthly, start).day_number(31).build().unwrap();
    check_dates(&data, &[date(2017, 11, 30), date(2017, 12, 31), date(2018, 1, 31)]);

    let data = three(RecurrenceType::Monthly, start)
        .day_number(31)
        .frequency(2)
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 11, 30), date(2018, 1, 31), date(2018, 3, 31)]);
}

// ───────────────────────── yearly ─────────────────────────

fn yearly_relative(start: NaiveDate, n: u32, day: Weekday, month: u32) -> RecurringData {
    three(RecurrenceType::Yearly, start)
        .relative(true)
        .day_number(n)
        .day_of_week(day)
        .month_number(month)
        .build()
        .unwrap()
}

#[test]
fn test_yearly_relative() {
    let expected = [date(2017, 12, 20), date(2018, 12, 19), date(2019, 12, 18)];
    check_dates(&yearly_relative(date(2017, 12, 20), 3, Weekday::Wed, 12), &expected);
    check_dates(&yearly_relative(date(2017, 11, 1), 3, Weekday::Wed, 12), &expected);

    check_dates(
        &yearly_relative(date(2017, 11, 1), 3, Weekday::Wed, 9),
        &[date(2018, 9, 19), date(2019, 9, 18), date(2020, 9, 16)],
    );
    check_dates(
        &yearly_relative(date(2017, 11, 1), 5, Weekday::Wed, 6),
        &[date(2018, 6, 27), date(2019, 6, 26), date(2020, 6, 24)],
    );
}

#[test]
fn test_yearly_absolute() {
    let data = three(RecurrenceType::Yearly, date(2017, 11, 1))
        .day_number(15)
        .month_number(12)
        .build()
        .unwrap();
    check_dates(&data, &[date(2017, 12, 15), date(2018, 12, 15), date(2019, 12, 15)]);

    let data = three(RecurrenceType::Yearly, date(2017, 11, 1))
        .day_number(15)
        .month_number(6)
        .build()
        .unwrap();
    check_dates(&data, &[date(2018, 6, 15), date(2019, 6, 15), date(2020, 6, 15)]);
}

#[test]
fn test_yearly_leap_day_clamps() {
    let data = three(RecurrenceType::Yearly, date(2019, 1, 1))
        .day_number(29)
        .month_number(2)
        .build()
        .unwrap();
    check_dates(&data, &[date(2019, 2, 28), date(2020, 2, 29), date(2021, 2, 28)]);
}

// ───────────────────────── properties ─────────────────────────

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|i| match i {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    })
}

fn recurrence_strategy() -> impl Strategy<Value = RecurringData> {
    let start = (2000i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d));
    (
        start,
        0u8..7,
        1u32..4,
        1u32..=31,
        1u32..=5,
        weekday_strategy(),
        1u32..=12,
        1u8..128,
        1u32..12,
    )
        .prop_map(
            |(start, shape, frequency, day, ordinal, weekday, month, mask, count)| {
                let base = RecurringDataBuilder::new(
                    RecurrenceType::Daily,
                    start,
                    Termination::Occurrences(count),
                );
                let builder = match shape {
                    0 => base.frequency(frequency),
                    1 => base.frequency(frequency).working_days_only(true),
                    2 => {
                        let days: Vec<Weekday> = (0..7u32)
                            .filter(|i| mask & (1 << i) != 0)
                            .map(|i| date(2017, 11, 5 + i).weekday())
                            .collect();
                        RecurringDataBuilder::new(
                            RecurrenceType::Weekly,
                            start,
                            Termination::Occurrences(count),
                        )
                        .frequency(frequency)
                        .weekly_days(&days)
                    }
                    3 => RecurringDataBuilder::new(
                        RecurrenceType::Monthly,
                        start,
                        Termination::Occurrences(count),
                    )
                    .frequency(frequency)
                    .day_number(day),
                    4 => RecurringDataBuilder::new(
                        RecurrenceType::Monthly,
                        start,
                        Termination::Occurrences(count),
                    )
                    .frequency(frequency)
                    .relative(true)
                    .day_number(ordinal)
                    .day_of_week(weekday),
                    5 => RecurringDataBuilder::new(
                        RecurrenceType::Yearly,
                        start,
                        Termination::Occurrences(count),
                    )
                    .day_number(day)
                    .month_number(month),
                    _ => RecurringDataBuilder::new(
                        RecurrenceType::Yearly,
                        start,
                        Termination::Occurrences(count),
                    )
                    .relative(true)
                    .day_number(ordinal)
                    .day_of_week(weekday)
                    .month_number(month),
                };
                builder.build().unwrap()
            },
        )
}

proptest! {
    #[test]
    fn prop_termination_modes_agree(data in recurrence_strategy()) {
        let by_count = data.dates();
        let Termination::Occurrences(n) = data.termination() else {
            unreachable!()
        };
        prop_assert_eq!(by_count.len(), n as usize);
        let last = *by_count.last().unwrap();
        let by_finish = data.with_termination(Termination::FinishDate(last)).dates();
        prop_assert_eq!(by_count, by_finish);
    }

    #[test]
    fn prop_dates_ascend_from_start(data in recurrence_strategy()) {
        let dates = data.dates();
        prop_assert!(dates.iter().all(|d| *d >= data.start_date()));
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}
