//! Timescale partitioning: split time into consecutive buckets of a unit.
//!
//! Buckets are aligned to the start of the unit containing the anchor's
//! date. Each bucket ends one millisecond before the next one starts, so a
//! day bucket runs from 00:00:00.000 to 23:59:59.999.

use crate::date_ext::{add_months, midnight, start_of_month};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use pl_core::date_time_range::DateTimeRange;
use tracing::warn;

/// Smallest step between one bucket's end and the next bucket's start.
pub fn tick() -> TimeDelta {
    TimeDelta::milliseconds(1)
}

/// Granularity of a timescale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimescaleUnit {
    /// One minute.
    Minutes,
    /// One hour.
    Hours,
    /// One day.
    Days,
    /// Seven days from the configured week start.
    Weeks,
    /// Days 1–10, 11–20 and 21 to month end.
    ThirdsOfMonths,
    /// One calendar month.
    Months,
    /// Three months starting January, April, July or October.
    Quarters,
    /// Six months starting January or July.
    HalfYears,
    /// One calendar year.
    Years,
}

impl TimescaleUnit {
    /// Every unit, finest first.
    pub const ALL: [TimescaleUnit; 9] = [
        TimescaleUnit::Minutes,
        TimescaleUnit::Hours,
        TimescaleUnit::Days,
        TimescaleUnit::Weeks,
        TimescaleUnit::ThirdsOfMonths,
        TimescaleUnit::Months,
        TimescaleUnit::Quarters,
        TimescaleUnit::HalfYears,
        TimescaleUnit::Years,
    ];
}

impl std::fmt::Display for TimescaleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimescaleUnit::Minutes => "Minutes",
            TimescaleUnit::Hours => "Hours",
            TimescaleUnit::Days => "Days",
            TimescaleUnit::Weeks => "Weeks",
            TimescaleUnit::ThirdsOfMonths => "Thirds of Months",
            TimescaleUnit::Months => "Months",
            TimescaleUnit::Quarters => "Quarters",
            TimescaleUnit::HalfYears => "Half Years",
            TimescaleUnit::Years => "Years",
        };
        f.write_str(s)
    }
}

/// Produces timescales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimescalePartitioner {
    week_start_day: Weekday,
}

impl Default for TimescalePartitioner {
    fn default() -> Self {
        Self {
            week_start_day: Weekday::Mon,
        }
    }
}

impl TimescalePartitioner {
    /// A partitioner whose weeks start on Monday.
    pub fn new() -> Self {
        Self::default()
    }

    /// A partitioner whose weeks start on `day`.
    pub fn with_week_start_day(day: Weekday) -> Self {
        Self {
            week_start_day: day,
        }
    }

    /// First day of the week used by week buckets.
    pub fn week_start_day(&self) -> Weekday {
        self.week_start_day
    }

    /// Change the first day of the week.
    pub fn set_week_start_day(&mut self, day: Weekday) {
        self.week_start_day = day;
    }

    /// `count` contiguous buckets of `unit`, the first one containing the
    /// start of the unit that holds `anchor`'s date.
    pub fn create_timescale(
        &self,
        anchor: NaiveDateTime,
        unit: TimescaleUnit,
        count: usize,
    ) -> Vec<DateTimeRange> {
        let mut buckets = Vec::with_capacity(count);
        let Some(mut start) = self.first_start(anchor.date(), unit) else {
            warn!(%anchor, %unit, "timescale anchor out of range");
            return buckets;
        };
        while buckets.len() < count {
            let Some(next) = next_start(start, unit) else {
                warn!(%start, %unit, "timescale ran past the supported date range");
                break;
            };
            buckets.push(DateTimeRange::new(start, next - tick()));
            start = next;
        }
        buckets
    }

    fn first_start(&self, date: NaiveDate, unit: TimescaleUnit) -> Option<NaiveDateTime> {
        let day = match unit {
            TimescaleUnit::Minutes | TimescaleUnit::Hours | TimescaleUnit::Days => date,
            TimescaleUnit::Weeks => {
                let target = i64::from(self.week_start_day.num_days_from_monday());
                let current = i64::from(date.weekday().num_days_from_monday());
                date.checked_add_signed(TimeDelta::days(target - current))?
            }
            TimescaleUnit::ThirdsOfMonths | TimescaleUnit::Months => start_of_month(date),
            TimescaleUnit::Quarters => month_group_start(date, 3)?,
            TimescaleUnit::HalfYears => month_group_start(date, 6)?,
            TimescaleUnit::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1)?,
        };
        Some(midnight(day))
    }
}

/// First day of the `size`-month group (counted from January) holding `date`.
fn month_group_start(date: NaiveDate, size: u32) -> Option<NaiveDate> {
    let month = (date.month0() / size) * size + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1)
}

fn next_start(start: NaiveDateTime, unit: TimescaleUnit) -> Option<NaiveDateTime> {
    let date = start.date();
    match unit {
        TimescaleUnit::Minutes => start.checked_add_signed(TimeDelta::minutes(1)),
        TimescaleUnit::Hours => start.checked_add_signed(TimeDelta::hours(1)),
        TimescaleUnit::Days => date.checked_add_days(Days::new(1)).map(midnight),
        TimescaleUnit::Weeks => date.checked_add_days(Days::new(7)).map(midnight),
        TimescaleUnit::ThirdsOfMonths => match date.day() {
            1..=10 => date.with_day(11).map(midnight),
            11..=20 => date.with_day(21).map(midnight),
            _ => add_months(start_of_month(date), 1).map(midnight),
        },
        TimescaleUnit::Months => add_months(date, 1).map(midnight),
        TimescaleUnit::Quarters => add_months(date, 3).map(midnight),
        TimescaleUnit::HalfYears => add_months(date, 6).map(midnight),
        TimescaleUnit::Years => add_months(date, 12).map(midnight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn default_week_start_is_monday() {
        let mut p = TimescalePartitioner::new();
        assert_eq!(p.week_start_day(), Weekday::Mon);
        p.set_week_start_day(Weekday::Sun);
        assert_eq!(p.week_start_day(), Weekday::Sun);
    }

    #[test]
    fn zero_count() {
        let p = TimescalePartitioner::new();
        assert!(p
            .create_timescale(dt(2023, 6, 22, 9, 0), TimescaleUnit::Days, 0)
            .is_empty());
    }

    #[test]
    fn day_bucket_ends_one_tick_early() {
        let p = TimescalePartitioner::new();
        let buckets = p.create_timescale(dt(2023, 6, 22, 9, 0), TimescaleUnit::Days, 1);
        assert_eq!(buckets[0].start, Some(dt(2023, 6, 22, 0, 0)));
        assert_eq!(
            buckets[0].end,
            Some(dt(2023, 6, 22, 23, 59) + TimeDelta::milliseconds(59_999))
        );
    }

    #[test]
    fn group_starts() {
        let d = NaiveDate::from_ymd_opt(2023, 6, 22).unwrap();
        assert_eq!(month_group_start(d, 3), NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(month_group_start(d, 6), NaiveDate::from_ymd_opt(2023, 1, 1));
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(month_group_start(d, 3), NaiveDate::from_ymd_opt(2023, 10, 1));
        assert_eq!(month_group_start(d, 6), NaiveDate::from_ymd_opt(2023, 7, 1));
    }
}
