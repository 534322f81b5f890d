//! Combined calendar — the working time shared by two or more calendars.
//!
//! A typical use is an assignment worked on a task calendar by a resource
//! with its own calendar: only time that is working in both counts.

use crate::calendar::WorkingCalendar;
use crate::local_time_range::{intersect_all, LocalTimeRange};
use crate::time_unit_defaults::TimeUnitDefaults;
use chrono::{NaiveDate, Weekday};
use pl_core::ensure;
use pl_core::errors::Result;

/// A read-only intersection of calendars.
///
/// Ranges are intersected pairwise in input order. A day that any
/// constituent treats as non-working has no working time at all. Unit
/// conversion factors come from the first calendar.
pub struct CombinedCalendar<'a> {
    calendars: Vec<&'a dyn WorkingCalendar>,
    name: String,
}

impl std::fmt::Debug for CombinedCalendar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedCalendar")
            .field("name", &self.name)
            .field("calendars", &self.calendars.len())
            .finish()
    }
}

impl<'a> CombinedCalendar<'a> {
    /// Combine `calendars`.
    ///
    /// # Errors
    /// Fails if `calendars` is empty.
    pub fn new(calendars: Vec<&'a dyn WorkingCalendar>) -> Result<Self> {
        ensure!(
            !calendars.is_empty(),
            "a combined calendar needs at least one calendar"
        );
        let names: Vec<&str> = calendars.iter().map(|c| c.name()).collect();
        let name = names.join(" & ");
        Ok(Self { calendars, name })
    }

    /// Number of constituent calendars.
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Always `false`: construction requires at least one calendar.
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    fn reduce<F>(&self, ranges_of: F) -> Vec<LocalTimeRange>
    where
        F: Fn(&dyn WorkingCalendar) -> Vec<LocalTimeRange>,
    {
        let mut iter = self.calendars.iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };
        let mut acc = ranges_of(*first);
        for calendar in iter {
            if acc.is_empty() {
                break;
            }
            acc = intersect_all(&acc, &ranges_of(*calendar));
        }
        acc
    }
}

impl WorkingCalendar for CombinedCalendar<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn time_unit_defaults(&self) -> TimeUnitDefaults {
        self.calendars
            .first()
            .map(|c| c.time_unit_defaults())
            .unwrap_or_default()
    }

    fn hours_for_weekday(&self, day: Weekday) -> Vec<LocalTimeRange> {
        self.reduce(|c| c.hours_for_weekday(day))
    }

    fn hours_for_date(&self, date: NaiveDate) -> Vec<LocalTimeRange> {
        self.reduce(|c| c.hours_for_date(date))
    }
}
