//! `WorkWeek` — an alternate weekly pattern in force over a date range.
//!
//! A calendar may carry several work weeks, for example a shorter summer
//! week. On a date covered by a work week, its day entries replace the
//! calendar's own day model. A `Default` entry (or a working entry with no
//! hours) leaves that weekday to the day model.

use crate::day_type::DayType;
use crate::local_time_range::LocalTimeRange;
use crate::project_calendar::DayEntry;
use chrono::{NaiveDate, Weekday};

/// A date-ranged weekly pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkWeek {
    from: NaiveDate,
    to: NaiveDate,
    name: Option<String>,
    days: [DayEntry; 7],
}

impl WorkWeek {
    /// A work week covering `from..=to` with every weekday `Default`.
    /// Reversed bounds are swapped.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            name: None,
            days: Default::default(),
        }
    }

    /// Attach a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// First covered date.
    pub fn from_date(&self) -> NaiveDate {
        self.from
    }

    /// Last covered date (inclusive).
    pub fn to_date(&self) -> NaiveDate {
        self.to
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Whether `date` lies within `from..=to`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// The entry for `day`.
    pub fn day(&self, day: Weekday) -> &DayEntry {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// The week's own day type for `day`.
    pub fn day_type(&self, day: Weekday) -> DayType {
        self.day(day).day_type
    }

    /// The week's own hours for `day`.
    pub fn hours(&self, day: Weekday) -> &[LocalTimeRange] {
        &self.day(day).hours
    }

    /// Hours the week imposes on `day`: `Some(empty)` when non-working,
    /// `None` when the day is left to the calendar's day model.
    pub fn resolved_hours(&self, day: Weekday) -> Option<Vec<LocalTimeRange>> {
        let entry = self.day(day);
        match entry.day_type {
            DayType::NonWorking => Some(Vec::new()),
            DayType::Working if !entry.hours.is_empty() => Some(entry.hours.clone()),
            _ => None,
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Set the day type of `day`.
    pub fn set_day_type(&mut self, day: Weekday, day_type: DayType) {
        self.days[day.num_days_from_monday() as usize].day_type = day_type;
    }

    /// Replace the hours of `day`.
    pub fn set_hours(&mut self, day: Weekday, hours: &[LocalTimeRange]) {
        let mut hours = hours.to_vec();
        hours.sort_by_key(|r| r.start_offset());
        self.days[day.num_days_from_monday() as usize].hours = hours;
    }

    /// Mark `day` working with `hours` in one step.
    pub fn set_working_day(&mut self, day: Weekday, hours: &[LocalTimeRange]) {
        self.set_day_type(day, DayType::Working);
        self.set_hours(day, hours);
    }
}

impl std::fmt::Display for WorkWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[WorkWeek")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        write!(f, " {} to {}]", self.from, self.to)
    }
}
