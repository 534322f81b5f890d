//! `ProjectCalendar` — a weekly day model plus explicit and recurring
//! exceptions, optionally derived from a parent calendar.
//!
//! A calendar stores only its own data. Queries that need the parent go
//! through a [`CalendarView`], which pairs the calendar with the
//! [`CalendarSet`] that owns its parent.
//!
//! For a given date the effective exception is resolved once, in a fixed
//! order:
//!
//! 1. an explicit exception of the calendar,
//! 2. a materialised occurrence of one of its recurring exceptions,
//! 3. the parent's effective exception,
//! 4. otherwise none.
//!
//! Without an exception, a work week covering the date (the calendar's own,
//! then the parent's) supplies the hours, and failing that the day model
//! applies.

use crate::calendar::{default_working_hours, WorkingCalendar};
use crate::calendar_exception::CalendarException;
use crate::calendar_set::{CalendarId, CalendarSet};
use crate::day_type::DayType;
use crate::local_time_range::LocalTimeRange;
use crate::recurrence::{standard_working_weekday, RecurrenceType, RecurringData};
use crate::time_unit_defaults::TimeUnitDefaults;
use crate::work_week::WorkWeek;
use chrono::{Datelike, NaiveDate, Weekday};
use pl_core::errors::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Day model entry for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayEntry {
    /// Working state of the weekday.
    pub day_type: DayType,
    /// Working ranges, ordered by start.
    pub hours: Vec<LocalTimeRange>,
}

/// The exception in effect on a date, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveException<'a> {
    /// No exception; the day model applies.
    None,
    /// An occurrence of a recurring exception.
    Recurring(&'a CalendarException),
    /// An explicit, non-recurring exception.
    Explicit(&'a CalendarException),
}

impl<'a> EffectiveException<'a> {
    /// The exception, whichever kind it is.
    pub fn exception(&self) -> Option<&'a CalendarException> {
        match self {
            EffectiveException::None => None,
            EffectiveException::Recurring(e) | EffectiveException::Explicit(e) => Some(e),
        }
    }

    /// Whether an exception applies.
    pub fn is_some(&self) -> bool {
        !matches!(self, EffectiveException::None)
    }
}

/// Recurring exceptions of a later kind override earlier kinds on shared
/// dates.
const RECURRENCE_PRECEDENCE: [RecurrenceType; 4] = [
    RecurrenceType::Weekly,
    RecurrenceType::Monthly,
    RecurrenceType::Yearly,
    RecurrenceType::Daily,
];

fn index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// A working calendar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectCalendar {
    name: String,
    days: [DayEntry; 7],
    parent: Option<CalendarId>,
    defaults: TimeUnitDefaults,
    exceptions: Vec<CalendarException>,
    recurring: Vec<CalendarException>,
    occurrences: BTreeMap<NaiveDate, usize>,
    work_weeks: Vec<WorkWeek>,
}

impl ProjectCalendar {
    // ── Constructors ─────────────────────────────────────────────────────

    /// An empty calendar: every weekday is [`DayType::Default`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            days: Default::default(),
            parent: None,
            defaults: TimeUnitDefaults::default(),
            exceptions: Vec::new(),
            recurring: Vec::new(),
            occurrences: BTreeMap::new(),
            work_weeks: Vec::new(),
        }
    }

    /// The standard base calendar: Monday to Friday working 08:00–12:00 and
    /// 13:00–17:00, weekends non-working.
    pub fn with_default_hours(name: impl Into<String>) -> Self {
        let mut cal = Self::new(name);
        for (i, entry) in cal.days.iter_mut().enumerate() {
            if i < 5 {
                entry.day_type = DayType::Working;
                entry.hours = default_working_hours();
            } else {
                entry.day_type = DayType::NonWorking;
            }
        }
        cal
    }

    /// An empty calendar deriving from `parent`.
    pub fn derived(name: impl Into<String>, parent: CalendarId) -> Self {
        let mut cal = Self::new(name);
        cal.parent = Some(parent);
        cal
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Calendar name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the calendar.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent calendar id, if derived.
    pub fn parent(&self) -> Option<CalendarId> {
        self.parent
    }

    /// Whether this calendar derives from a parent.
    pub fn is_derived(&self) -> bool {
        self.parent.is_some()
    }

    /// Unit conversion factors.
    pub fn time_unit_defaults(&self) -> TimeUnitDefaults {
        self.defaults
    }

    /// The calendar's own day type for `day` (may be `Default`).
    pub fn day_type(&self, day: Weekday) -> DayType {
        self.days[index(day)].day_type
    }

    /// The calendar's own hours for `day`.
    pub fn hours(&self, day: Weekday) -> &[LocalTimeRange] {
        &self.days[index(day)].hours
    }

    /// Explicit (non-recurring) exceptions, ordered by start date.
    pub fn calendar_exceptions(&self) -> &[CalendarException] {
        &self.exceptions
    }

    /// Recurring exception templates, in insertion order.
    pub fn recurring_exceptions(&self) -> &[CalendarException] {
        &self.recurring
    }

    /// Dates covered by a recurring exception, ascending.
    pub fn recurring_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.occurrences.keys().copied()
    }

    /// Work weeks, ordered by start date.
    pub fn work_weeks(&self) -> &[WorkWeek] {
        &self.work_weeks
    }

    /// The calendar's own work week covering `date`, ignoring any parent.
    pub fn work_week(&self, date: NaiveDate) -> Option<&WorkWeek> {
        self.work_weeks
            .iter()
            .take_while(|w| w.from_date() <= date)
            .find(|w| w.contains(date))
    }

    /// The calendar's own effective exception on `date`, ignoring any parent.
    pub fn effective_exception(&self, date: NaiveDate) -> EffectiveException<'_> {
        if let Some(e) = self.explicit_exception(date) {
            return EffectiveException::Explicit(e);
        }
        match self.occurrences.get(&date).and_then(|i| self.recurring.get(*i)) {
            Some(e) => EffectiveException::Recurring(e),
            None => EffectiveException::None,
        }
    }

    fn explicit_exception(&self, date: NaiveDate) -> Option<&CalendarException> {
        self.exceptions
            .iter()
            .take_while(|e| e.from_date() <= date)
            .find(|e| e.contains(date))
    }

    /// A view of this calendar with no registry. A parent id cannot be
    /// resolved through it and is ignored.
    pub fn view(&self) -> CalendarView<'_> {
        CalendarView {
            calendar: self,
            set: None,
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Set the day type of `day`.
    pub fn set_day_type(&mut self, day: Weekday, day_type: DayType) {
        self.days[index(day)].day_type = day_type;
        self.materialize();
    }

    /// Replace the hours of `day`.
    pub fn set_hours(&mut self, day: Weekday, hours: &[LocalTimeRange]) {
        let mut hours = hours.to_vec();
        hours.sort_by_key(|r| r.start_offset());
        self.days[index(day)].hours = hours;
        self.materialize();
    }

    /// Mark `day` working with `hours` in one step.
    pub fn set_working_day(&mut self, day: Weekday, hours: &[LocalTimeRange]) {
        self.days[index(day)].day_type = DayType::Working;
        self.set_hours(day, hours);
    }

    /// Replace the unit conversion factors.
    pub fn set_time_unit_defaults(&mut self, defaults: TimeUnitDefaults) {
        self.defaults = defaults;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<CalendarId>) {
        self.parent = parent;
    }

    /// Add a non-working explicit exception covering `from..=to` and return
    /// it for further configuration.
    pub fn add_calendar_exception(&mut self, from: NaiveDate, to: NaiveDate) -> &mut CalendarException {
        self.insert_exception(CalendarException::new(from, to))
    }

    /// Add a fully built exception. Recurring templates are materialised.
    pub fn add_exception(&mut self, exception: CalendarException) -> &CalendarException {
        if exception.is_recurring() {
            self.recurring.push(exception);
            self.materialize();
            let last = self.recurring.len() - 1;
            &self.recurring[last]
        } else {
            self.insert_exception(exception)
        }
    }

    /// Add a recurring exception working over `ranges` (non-working when
    /// empty).
    ///
    /// # Errors
    /// Fails when more ranges are supplied than an exception can hold.
    pub fn add_recurring_exception(
        &mut self,
        data: RecurringData,
        ranges: &[LocalTimeRange],
    ) -> Result<&CalendarException> {
        let exception = CalendarException::recurring(data).with_ranges(ranges)?;
        Ok(self.add_exception(exception))
    }

    /// Remove every explicit and recurring exception.
    pub fn clear_calendar_exceptions(&mut self) {
        self.exceptions.clear();
        self.recurring.clear();
        self.occurrences.clear();
    }

    /// Add a work week covering `from..=to`, every weekday `Default`, and
    /// return it for further configuration.
    pub fn add_work_week(&mut self, from: NaiveDate, to: NaiveDate) -> &mut WorkWeek {
        let week = WorkWeek::new(from, to);
        let at = self
            .work_weeks
            .partition_point(|w| w.from_date() <= week.from_date());
        self.work_weeks.insert(at, week);
        &mut self.work_weeks[at]
    }

    /// Remove the work week starting on `from`, returning it.
    pub fn remove_work_week(&mut self, from: NaiveDate) -> Option<WorkWeek> {
        let at = self.work_weeks.iter().position(|w| w.from_date() == from)?;
        Some(self.work_weeks.remove(at))
    }

    /// Remove every work week.
    pub fn clear_work_weeks(&mut self) {
        self.work_weeks.clear();
    }

    fn insert_exception(&mut self, exception: CalendarException) -> &mut CalendarException {
        let from = exception.from_date();
        let at = self.exceptions.partition_point(|e| e.from_date() <= from);
        self.exceptions.insert(at, exception);
        &mut self.exceptions[at]
    }

    /// Rebuild the date → recurring template map and each template's span.
    /// Later entries in the precedence order overwrite earlier ones.
    fn materialize(&mut self) {
        let days = &self.days;
        let is_working = |day: Weekday| match days[index(day)].day_type {
            DayType::Working => true,
            DayType::NonWorking => false,
            DayType::Default => standard_working_weekday(day),
        };
        let expansions: Vec<Vec<NaiveDate>> = self
            .recurring
            .iter()
            .map(|t| {
                t.recurring_data()
                    .map(|data| data.dates_with(&is_working))
                    .unwrap_or_default()
            })
            .collect();

        for (template, dates) in self.recurring.iter_mut().zip(&expansions) {
            if let Some(start) = template.recurring_data().map(RecurringData::start_date) {
                template.set_span(dates, start);
            }
        }

        let mut occurrences = BTreeMap::new();
        for kind in RECURRENCE_PRECEDENCE {
            for (i, template) in self.recurring.iter().enumerate() {
                let Some(data) = template.recurring_data() else {
                    continue;
                };
                if data.recurrence_type() != kind {
                    continue;
                }
                for date in &expansions[i] {
                    occurrences.insert(*date, i);
                }
            }
        }
        debug!(
            calendar = %self.name,
            templates = self.recurring.len(),
            dates = occurrences.len(),
            "materialised recurring exceptions"
        );
        self.occurrences = occurrences;
    }
}

impl std::fmt::Display for ProjectCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[ProjectCalendar {}", self.name)?;
        if let Some(parent) = self.parent {
            writeln!(f, "  parent: {parent}")?;
        }
        for day in ALL_WEEKDAYS {
            let entry = &self.days[index(day)];
            let hours: Vec<String> = entry.hours.iter().map(|r| r.to_string()).collect();
            writeln!(f, "  {day}: {} {}", entry.day_type, hours.join(", "))?;
        }
        for e in self.exceptions.iter().chain(self.recurring.iter()) {
            writeln!(f, "  {e}")?;
        }
        for w in &self.work_weeks {
            writeln!(f, "  {w}")?;
        }
        write!(f, "]")
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── CalendarView ─────────────────────────────────────────────────────────────

/// A calendar together with the registry used to resolve its parent.
#[derive(Debug, Clone, Copy)]
pub struct CalendarView<'a> {
    calendar: &'a ProjectCalendar,
    set: Option<&'a CalendarSet>,
}

impl<'a> CalendarView<'a> {
    pub(crate) fn new(calendar: &'a ProjectCalendar, set: &'a CalendarSet) -> Self {
        Self {
            calendar,
            set: Some(set),
        }
    }

    /// The underlying calendar.
    pub fn calendar(&self) -> &'a ProjectCalendar {
        self.calendar
    }

    /// A view of the parent calendar, if the calendar is derived and the
    /// parent can be resolved.
    pub fn parent(&self) -> Option<CalendarView<'a>> {
        let id = self.calendar.parent?;
        let Some(set) = self.set else {
            debug!(calendar = %self.calendar.name, %id, "standalone view ignores parent");
            return None;
        };
        let parent = set.get(id);
        if parent.is_none() {
            warn!(
                calendar = %self.calendar.name,
                %id,
                "parent calendar not found, treating calendar as a base calendar"
            );
        }
        parent.map(|calendar| CalendarView {
            calendar,
            set: self.set,
        })
    }

    /// The exception in effect on `date`, walking the parent chain.
    pub fn exception(&self, date: NaiveDate) -> EffectiveException<'a> {
        match self.calendar.effective_exception(date) {
            EffectiveException::None => self
                .parent()
                .map_or(EffectiveException::None, |p| p.exception(date)),
            found => found,
        }
    }

    /// The work week covering `date`, walking the parent chain.
    pub fn work_week(&self, date: NaiveDate) -> Option<&'a WorkWeek> {
        match self.calendar.work_week(date) {
            Some(week) => Some(week),
            None => self.parent()?.work_week(date),
        }
    }

    /// Hours imposed on `date` by a work week, or `None` when the day model
    /// decides.
    fn work_week_hours(&self, date: NaiveDate) -> Option<Vec<LocalTimeRange>> {
        self.work_week(date)?.resolved_hours(date.weekday())
    }

    /// Day type of `day` with `Default` resolved through the parent chain.
    /// A base calendar resolves `Default` to the Monday–Friday week.
    pub fn resolved_day_type(&self, day: Weekday) -> DayType {
        match self.calendar.day_type(day) {
            DayType::Default => match self.parent() {
                Some(parent) => parent.resolved_day_type(day),
                None if standard_working_weekday(day) => DayType::Working,
                None => DayType::NonWorking,
            },
            resolved => resolved,
        }
    }

    fn weekday_hours(&self, day: Weekday) -> Vec<LocalTimeRange> {
        let own = self.calendar.hours(day);
        match self.calendar.day_type(day) {
            DayType::NonWorking => Vec::new(),
            DayType::Working if !own.is_empty() => own.to_vec(),
            _ => match self.parent() {
                Some(parent) => parent.weekday_hours(day),
                None if self.resolved_day_type(day) == DayType::Working => {
                    if own.is_empty() {
                        default_working_hours()
                    } else {
                        own.to_vec()
                    }
                }
                None => Vec::new(),
            },
        }
    }
}

impl WorkingCalendar for CalendarView<'_> {
    fn name(&self) -> &str {
        self.calendar.name()
    }

    fn time_unit_defaults(&self) -> TimeUnitDefaults {
        self.calendar.defaults
    }

    fn hours_for_weekday(&self, day: Weekday) -> Vec<LocalTimeRange> {
        if self.resolved_day_type(day) == DayType::Working {
            self.weekday_hours(day)
        } else {
            Vec::new()
        }
    }

    fn hours_for_date(&self, date: NaiveDate) -> Vec<LocalTimeRange> {
        if let Some(e) = self.exception(date).exception() {
            return e.ranges().to_vec();
        }
        self.work_week_hours(date)
            .unwrap_or_else(|| self.hours_for_weekday(date.weekday()))
    }

    fn is_working_date(&self, date: NaiveDate) -> bool {
        if let Some(e) = self.exception(date).exception() {
            return e.working();
        }
        match self.work_week_hours(date) {
            Some(hours) => !hours.is_empty(),
            None => self.resolved_day_type(date.weekday()) == DayType::Working,
        }
    }

    fn is_working_day(&self, day: Weekday) -> bool {
        self.resolved_day_type(day) == DayType::Working
    }
}
