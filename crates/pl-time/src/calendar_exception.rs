//! `CalendarException` — a date-range override of a calendar's day model.
//!
//! An exception with no working ranges marks its dates as non-working. A
//! recurring exception is a template: its [`RecurringData`] is expanded into
//! one single-day occurrence per generated date, all sharing its ranges.

use crate::local_time_range::{total_length, LocalTimeRange};
use crate::recurrence::RecurringData;
use chrono::{NaiveDate, TimeDelta};
use pl_core::ensure;
use pl_core::errors::Result;

/// Most working ranges a single exception may carry.
pub const MAX_EXCEPTION_RANGES: usize = 5;

/// An explicit or recurring calendar exception.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarException {
    from: NaiveDate,
    to: NaiveDate,
    name: Option<String>,
    ranges: Vec<LocalTimeRange>,
    recurring: Option<RecurringData>,
}

impl CalendarException {
    /// A non-working exception covering `from..=to`. Reversed bounds are
    /// swapped.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            name: None,
            ranges: Vec::new(),
            recurring: None,
        }
    }

    /// A non-working exception covering a single day.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// A recurring template. Its date span runs from the first to the last
    /// date generated over a Monday to Friday week (or the start date when
    /// nothing is generated). A calendar recomputes the span against its own
    /// week when the template is added.
    pub fn recurring(data: RecurringData) -> Self {
        let mut exception = Self {
            from: data.start_date(),
            to: data.start_date(),
            name: None,
            ranges: Vec::new(),
            recurring: None,
        };
        exception.set_span(&data.dates(), data.start_date());
        exception.recurring = Some(data);
        exception
    }

    /// Reset `from..=to` to cover `dates`, ascending, or just `fallback` when
    /// there are none.
    pub(crate) fn set_span(&mut self, dates: &[NaiveDate], fallback: NaiveDate) {
        self.from = dates.first().copied().unwrap_or(fallback);
        self.to = dates.last().copied().unwrap_or(self.from);
    }

    /// Attach a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add working ranges, consuming and returning the exception.
    ///
    /// # Errors
    /// Fails when the exception would exceed [`MAX_EXCEPTION_RANGES`].
    pub fn with_ranges(mut self, ranges: &[LocalTimeRange]) -> Result<Self> {
        for range in ranges {
            self.add_range(*range)?;
        }
        Ok(self)
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

    /// Working ranges, ordered by start.
    pub fn ranges(&self) -> &[LocalTimeRange] {
        &self.ranges
    }

    /// Recurrence descriptor, for recurring templates.
    pub fn recurring_data(&self) -> Option<&RecurringData> {
        self.recurring.as_ref()
    }

    /// Whether this exception is a recurring template.
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some()
    }

    /// Whether the covered dates are worked.
    pub fn working(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Whether `date` lies within `from..=to`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Total working time on each covered date.
    pub fn working_time(&self) -> TimeDelta {
        total_length(&self.ranges)
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Add a working range, keeping ranges ordered by start.
    ///
    /// # Errors
    /// Fails when the exception already holds [`MAX_EXCEPTION_RANGES`] ranges.
    pub fn add_range(&mut self, range: LocalTimeRange) -> Result<()> {
        ensure!(
            self.ranges.len() < MAX_EXCEPTION_RANGES,
            "an exception holds at most {MAX_EXCEPTION_RANGES} ranges"
        );
        let at = self
            .ranges
            .partition_point(|r| r.start_offset() <= range.start_offset());
        self.ranges.insert(at, range);
        Ok(())
    }

    /// Remove every working range, making the exception non-working.
    pub fn clear_ranges(&mut self) {
        self.ranges.clear();
    }
}

impl std::fmt::Display for CalendarException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[CalendarException")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        write!(f, " {} to {}", self.from, self.to)?;
        if self.ranges.is_empty() {
            write!(f, " non-working")?;
        } else {
            let ranges: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
            write!(f, " working {}", ranges.join(", "))?;
        }
        if let Some(data) = &self.recurring {
            write!(f, " ({data})")?;
        }
        write!(f, "]")
    }
}
