//! `WorkingCalendar` trait: working-time calculus over a calendar.
//!
//! Implementors supply the working ranges of a weekday and of a date; every
//! other query (work between instants, date arithmetic, next work start and
//! so on) is provided on top of those two.

use crate::date_ext::midnight;
use crate::duration::Duration;
use crate::local_time_range::{total_length, LocalTimeRange};
use crate::time_unit::TimeUnit;
use crate::time_unit_defaults::TimeUnitDefaults;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use tracing::warn;

/// Date arithmetic gives up after this many consecutive non-working days.
pub const MAX_NONWORKING_DAYS: u32 = 1000;

/// A calendar that can answer working-time questions.
pub trait WorkingCalendar: std::fmt::Debug {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Conversion factors for durations measured against this calendar.
    fn time_unit_defaults(&self) -> TimeUnitDefaults;

    /// Working ranges of `day` in the weekly pattern, ignoring exceptions.
    /// Empty for a non-working weekday.
    fn hours_for_weekday(&self, day: Weekday) -> Vec<LocalTimeRange>;

    /// Working ranges on `date`, exceptions applied. Empty for a
    /// non-working date.
    fn hours_for_date(&self, date: NaiveDate) -> Vec<LocalTimeRange>;

    /// Return `true` if `date` is a working date.
    fn is_working_date(&self, date: NaiveDate) -> bool {
        !self.hours_for_date(date).is_empty()
    }

    /// Return `true` if `day` is a working weekday in the weekly pattern.
    fn is_working_day(&self, day: Weekday) -> bool {
        !self.hours_for_weekday(day).is_empty()
    }

    /// Working time on `day` in the weekly pattern.
    fn work_for_weekday(&self, day: Weekday, unit: TimeUnit) -> Duration {
        Duration::from_time_delta(
            total_length(&self.hours_for_weekday(day)),
            unit,
            &self.time_unit_defaults(),
        )
    }

    /// Working time on `date`.
    fn work_for_date(&self, date: NaiveDate, unit: TimeUnit) -> Duration {
        Duration::from_time_delta(
            total_length(&self.hours_for_date(date)),
            unit,
            &self.time_unit_defaults(),
        )
    }

    /// Exact working time in `[start, end)`; zero when `end <= start`.
    fn working_time_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> TimeDelta {
        let mut total = TimeDelta::zero();
        let mut date = start.date();
        while midnight(date) < end {
            for range in self.hours_for_date(date) {
                let (from, to) = range.on(date);
                let from = from.max(start);
                let to = to.min(end);
                if from < to {
                    total += to - from;
                }
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        total
    }

    /// Working time between two instants, negative when `end < start`.
    fn work_between(&self, start: NaiveDateTime, end: NaiveDateTime, unit: TimeUnit) -> Duration {
        let defaults = self.time_unit_defaults();
        if end < start {
            -Duration::from_time_delta(self.working_time_between(end, start), unit, &defaults)
        } else {
            Duration::from_time_delta(self.working_time_between(start, end), unit, &defaults)
        }
    }

    /// Number of working dates in `start..=end`.
    fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_working_date(*d))
            .count() as u32
    }

    /// The instant reached after consuming `duration` of working time from
    /// `start`, walking backward when the duration is negative. Elapsed
    /// units ignore the calendar and are added as wall-clock time.
    ///
    /// Returns `None` when no working time is found within
    /// [`MAX_NONWORKING_DAYS`] consecutive days.
    fn date_after(&self, start: NaiveDateTime, duration: Duration) -> Option<NaiveDateTime> {
        let delta = duration.to_time_delta(&self.time_unit_defaults());
        if duration.unit().is_elapsed() {
            start.checked_add_signed(delta)
        } else if delta > TimeDelta::zero() {
            walk_forward(self, start, delta)
        } else if delta < TimeDelta::zero() {
            walk_backward(self, start, -delta)
        } else {
            Some(start)
        }
    }

    /// The first working instant at or after `instant`.
    fn next_work_start(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut date = instant.date();
        let mut idle = 0;
        loop {
            for range in self.hours_for_date(date) {
                let (from, to) = range.on(date);
                if to > instant {
                    return Some(from.max(instant));
                }
            }
            idle += 1;
            if idle > MAX_NONWORKING_DAYS {
                warn!(calendar = self.name(), %instant, "no working time found going forward");
                return None;
            }
            date = date.succ_opt()?;
        }
    }

    /// The last working instant at or before `instant`.
    fn previous_work_finish(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut date = day_ending_at(instant);
        let mut idle = 0;
        loop {
            for range in self.hours_for_date(date).iter().rev() {
                let (from, to) = range.on(date);
                if from < instant {
                    return Some(to.min(instant));
                }
            }
            idle += 1;
            if idle > MAX_NONWORKING_DAYS {
                warn!(calendar = self.name(), %instant, "no working time found going backward");
                return None;
            }
            date = date.pred_opt()?;
        }
    }

    /// When work starts on `date`, or `None` for a non-working date.
    fn start_time(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.hours_for_date(date).first().map(|r| r.on(date).0)
    }

    /// When work finishes on `date`, or `None` for a non-working date. A
    /// range ending at midnight finishes at 00:00 of the following day.
    fn finish_time(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.hours_for_date(date).last().map(|r| r.on(date).1)
    }
}

/// The date whose working day can end at `instant`: an instant at exactly
/// midnight belongs to the previous day.
fn day_ending_at(instant: NaiveDateTime) -> NaiveDate {
    if instant.time() == NaiveTime::MIN {
        instant
            .date()
            .checked_sub_days(Days::new(1))
            .unwrap_or(instant.date())
    } else {
        instant.date()
    }
}

fn walk_forward<C>(calendar: &C, start: NaiveDateTime, mut remaining: TimeDelta) -> Option<NaiveDateTime>
where
    C: WorkingCalendar + ?Sized,
{
    let mut cursor = start;
    let mut idle = 0;
    loop {
        let date = cursor.date();
        let mut progressed = false;
        for range in calendar.hours_for_date(date) {
            let (from, to) = range.on(date);
            if to <= cursor {
                continue;
            }
            let from = from.max(cursor);
            let available = to - from;
            if remaining <= available {
                return Some(from + remaining);
            }
            remaining -= available;
            progressed = true;
        }
        idle = if progressed { 0 } else { idle + 1 };
        if idle > MAX_NONWORKING_DAYS {
            warn!(calendar = calendar.name(), %start, "date arithmetic ran out of working days");
            return None;
        }
        cursor = midnight(date.succ_opt()?);
    }
}

fn walk_backward<C>(calendar: &C, start: NaiveDateTime, mut remaining: TimeDelta) -> Option<NaiveDateTime>
where
    C: WorkingCalendar + ?Sized,
{
    let mut cursor = start;
    let mut idle = 0;
    loop {
        let date = day_ending_at(cursor);
        let mut progressed = false;
        for range in calendar.hours_for_date(date).iter().rev() {
            let (from, to) = range.on(date);
            if from >= cursor {
                continue;
            }
            let to = to.min(cursor);
            let available = to - from;
            if remaining <= available {
                return Some(to - remaining);
            }
            remaining -= available;
            progressed = true;
        }
        idle = if progressed { 0 } else { idle + 1 };
        if idle > MAX_NONWORKING_DAYS {
            warn!(calendar = calendar.name(), %start, "date arithmetic ran out of working days");
            return None;
        }
        cursor = midnight(date);
    }
}

// ── Standard week ────────────────────────────────────────────────────────────

/// The standard working ranges, 08:00–12:00 and 13:00–17:00.
pub fn default_working_hours() -> Vec<LocalTimeRange> {
    vec![
        LocalTimeRange::from_minutes(8 * 60, 12 * 60),
        LocalTimeRange::from_minutes(13 * 60, 17 * 60),
    ]
}

/// A fixed Monday–Friday calendar with the standard working ranges and no
/// exceptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWeek;

impl WorkingCalendar for StandardWeek {
    fn name(&self) -> &str {
        "Standard"
    }

    fn time_unit_defaults(&self) -> TimeUnitDefaults {
        TimeUnitDefaults::default()
    }

    fn hours_for_weekday(&self, day: Weekday) -> Vec<LocalTimeRange> {
        if crate::recurrence::standard_working_weekday(day) {
            default_working_hours()
        } else {
            Vec::new()
        }
    }

    fn hours_for_date(&self, date: NaiveDate) -> Vec<LocalTimeRange> {
        use chrono::Datelike;
        self.hours_for_weekday(date.weekday())
    }
}
