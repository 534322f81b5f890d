//! Recurrence descriptors and their expansion into concrete dates.
//!
//! A [`RecurringData`] describes a daily, weekly, monthly or yearly pattern
//! together with a [`Termination`] rule. Expansion produces an ascending
//! sequence of dates: the first date is the first pattern match on or after
//! the start date, never the start date itself unless it matches.
//!
//! Descriptors are built with [`RecurringDataBuilder`], which validates the
//! pattern fields for the chosen [`RecurrenceType`].

use crate::date_ext::{add_months, clamped_day, nth_weekday, start_of_month};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use pl_core::ensure;
use pl_core::errors::Result;
use tracing::debug;

/// Kind of recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecurrenceType {
    /// Every `frequency` days.
    Daily,
    /// Selected weekdays every `frequency` weeks.
    Weekly,
    /// One day every `frequency` months.
    Monthly,
    /// One day every year.
    Yearly,
}

impl std::fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceType::Daily => write!(f, "Daily"),
            RecurrenceType::Weekly => write!(f, "Weekly"),
            RecurrenceType::Monthly => write!(f, "Monthly"),
            RecurrenceType::Yearly => write!(f, "Yearly"),
        }
    }
}

/// How a recurrence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Stop after this many dates. Zero is treated as one.
    Occurrences(u32),
    /// Stop after the last date on or before this one.
    FinishDate(NaiveDate),
}

/// Weekdays in Sunday-first order, the order weekly recurrences emit them.
const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Ordinal names for relative day numbers.
const DAY_ORDINAL: [&str; 5] = ["first", "second", "third", "fourth", "last"];

/// Monday to Friday.
pub fn standard_working_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

/// A validated recurrence descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecurringData {
    recurrence_type: RecurrenceType,
    start_date: NaiveDate,
    termination: Termination,
    frequency: u32,
    relative: bool,
    working_days_only: bool,
    day_number: u32,
    day_of_week: Weekday,
    month_number: u32,
    weekly_days: u8,
}

impl RecurringData {
    // ── Accessors ────────────────────────────────────────────────────────

    /// Kind of recurrence.
    pub fn recurrence_type(&self) -> RecurrenceType {
        self.recurrence_type
    }

    /// Date from which matches are searched.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Termination rule.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Step between periods (days, weeks or months).
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Whether monthly/yearly matches are relative to a weekday.
    pub fn relative(&self) -> bool {
        self.relative
    }

    /// Whether daily recurrences only land on working days.
    pub fn working_days_only(&self) -> bool {
        self.working_days_only
    }

    /// Day of month (absolute) or weekday ordinal (relative, 5 = last).
    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    /// Weekday used by relative recurrences.
    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Month (1–12) used by yearly recurrences.
    pub fn month_number(&self) -> u32 {
        self.month_number
    }

    /// Whether `day` is selected for a weekly recurrence.
    pub fn weekly_day(&self, day: Weekday) -> bool {
        self.weekly_days & weekday_bit(day) != 0
    }

    /// The selected weekly days, Sunday first.
    pub fn weekly_days(&self) -> Vec<Weekday> {
        SUNDAY_FIRST
            .into_iter()
            .filter(|d| self.weekly_day(*d))
            .collect()
    }

    /// A copy of this descriptor with a different termination rule.
    pub fn with_termination(&self, termination: Termination) -> Self {
        Self {
            termination,
            ..self.clone()
        }
    }

    // ── Expansion ────────────────────────────────────────────────────────

    /// Expand with Monday–Friday as the working week.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates_with(standard_working_weekday)
    }

    /// Expand using `is_working` to decide which weekdays a working-days-only
    /// daily recurrence may land on.
    pub fn dates_with<F>(&self, is_working: F) -> Vec<NaiveDate>
    where
        F: Fn(Weekday) -> bool,
    {
        let dates: Vec<NaiveDate> = self.iter_with(is_working).collect();
        debug!(
            recurrence = %self.recurrence_type,
            start = %self.start_date,
            count = dates.len(),
            "expanded recurrence"
        );
        dates
    }

    /// Lazily expand with Monday–Friday as the working week. Each call
    /// restarts from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.iter_with(standard_working_weekday)
    }

    /// Lazily expand with a custom working-weekday oracle.
    pub fn iter_with<'a, F>(&'a self, is_working: F) -> impl Iterator<Item = NaiveDate> + 'a
    where
        F: Fn(Weekday) -> bool + 'a,
    {
        let candidates = self.candidates(is_working);
        let (limit, finish) = match self.termination {
            Termination::Occurrences(n) => (n.max(1) as usize, None),
            Termination::FinishDate(d) => (usize::MAX, Some(d)),
        };
        candidates
            .take_while(move |d| finish.map_or(true, |f| *d <= f))
            .take(limit)
    }

    /// The first date the pattern actually produces.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.iter().next()
    }

    /// The unbounded ascending sequence of pattern matches.
    fn candidates<'a, F>(&'a self, is_working: F) -> Box<dyn Iterator<Item = NaiveDate> + 'a>
    where
        F: Fn(Weekday) -> bool + 'a,
    {
        let start = self.start_date;
        let step = u64::from(self.frequency);
        match self.recurrence_type {
            RecurrenceType::Daily if self.working_days_only => {
                if !SUNDAY_FIRST.iter().any(|d| is_working(*d)) {
                    return Box::new(std::iter::empty());
                }
                let first = next_working(start, &is_working);
                Box::new(std::iter::successors(first, move |d| {
                    let mut current = *d;
                    for _ in 0..step {
                        current = next_working(current.succ_opt()?, &is_working)?;
                    }
                    Some(current)
                }))
            }
            RecurrenceType::Daily => Box::new(std::iter::successors(Some(start), move |d| {
                d.checked_add_days(Days::new(step))
            })),
            RecurrenceType::Weekly => {
                let back = u64::from(start.weekday().num_days_from_sunday());
                let anchor = start.checked_sub_days(Days::new(back)).unwrap_or(start);
                let mask = self.weekly_days;
                Box::new(
                    (0u64..)
                        .map_while(move |k| anchor.checked_add_days(Days::new(k * 7 * step)))
                        .flat_map(move |week| {
                            SUNDAY_FIRST.into_iter().enumerate().filter_map(move |(i, d)| {
                                (mask & weekday_bit(d) != 0)
                                    .then(|| week.checked_add_days(Days::new(i as u64)))
                                    .flatten()
                            })
                        })
                        .filter(move |d| *d >= start),
                )
            }
            RecurrenceType::Monthly => {
                let first_month = if !self.relative && self.day_number < start.day() {
                    add_months(start_of_month(start), 1)
                } else {
                    Some(start_of_month(start))
                };
                let (relative, day_number, weekday) =
                    (self.relative, self.day_number, self.day_of_week);
                Box::new(
                    (0u32..)
                        .map_while(move |k| add_months(first_month?, k.checked_mul(self.frequency)?))
                        .filter_map(move |month| {
                            if relative {
                                nth_weekday(month.year(), month.month(), weekday, day_number)
                            } else {
                                clamped_day(month.year(), month.month(), day_number)
                            }
                        })
                        .filter(move |d| *d >= start),
                )
            }
            RecurrenceType::Yearly => {
                let (relative, day_number, weekday, month) = (
                    self.relative,
                    self.day_number,
                    self.day_of_week,
                    self.month_number,
                );
                Box::new(
                    (start.year()..=NaiveDate::MAX.year())
                        .filter_map(move |year| {
                            if relative {
                                nth_weekday(year, month, weekday, day_number)
                            } else {
                                clamped_day(year, month, day_number)
                            }
                        })
                        .filter(move |d| *d >= start),
                )
            }
        }
    }
}

fn weekday_bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

/// First date on or after `date` whose weekday is working, within a week.
fn next_working<F>(date: NaiveDate, is_working: &F) -> Option<NaiveDate>
where
    F: Fn(Weekday) -> bool,
{
    (0..7u64)
        .filter_map(|i| date.checked_add_days(Days::new(i)))
        .find(|d| is_working(d.weekday()))
}

fn every(frequency: u32, unit: &str) -> String {
    match frequency {
        1 => format!("every {unit}"),
        2 => format!("every other {unit}"),
        n => format!("every {n} {unit}s"),
    }
}

impl std::fmt::Display for RecurringData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ordinal = DAY_ORDINAL[(self.day_number.clamp(1, 5) - 1) as usize];
        match self.recurrence_type {
            RecurrenceType::Daily if self.working_days_only => {
                write!(f, "Daily, {}", every(self.frequency, "working day"))?
            }
            RecurrenceType::Daily => write!(f, "Daily, {}", every(self.frequency, "day"))?,
            RecurrenceType::Weekly => {
                let days: Vec<String> = self.weekly_days().iter().map(|d| d.to_string()).collect();
                write!(
                    f,
                    "Weekly, {} on {}",
                    every(self.frequency, "week"),
                    days.join(", ")
                )?
            }
            RecurrenceType::Monthly if self.relative => write!(
                f,
                "Monthly, the {ordinal} {} of {}",
                self.day_of_week,
                every(self.frequency, "month")
            )?,
            RecurrenceType::Monthly => write!(
                f,
                "Monthly, day {} of {}",
                self.day_number,
                every(self.frequency, "month")
            )?,
            RecurrenceType::Yearly if self.relative => write!(
                f,
                "Yearly, the {ordinal} {} of month {}",
                self.day_of_week, self.month_number
            )?,
            RecurrenceType::Yearly => write!(
                f,
                "Yearly, day {} of month {}",
                self.day_number, self.month_number
            )?,
        }
        write!(f, ", from {}", self.start_date)?;
        match self.termination {
            Termination::Occurrences(n) => write!(f, ", {n} occurrences"),
            Termination::FinishDate(d) => write!(f, ", until {d}"),
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Builder for [`RecurringData`].
#[derive(Debug, Clone)]
pub struct RecurringDataBuilder {
    recurrence_type: RecurrenceType,
    start_date: NaiveDate,
    termination: Termination,
    frequency: u32,
    relative: bool,
    working_days_only: bool,
    day_number: Option<u32>,
    day_of_week: Option<Weekday>,
    month_number: Option<u32>,
    weekly_days: u8,
}

impl RecurringDataBuilder {
    /// Begin building a recurrence of `recurrence_type` starting at `start_date`.
    pub fn new(
        recurrence_type: RecurrenceType,
        start_date: NaiveDate,
        termination: Termination,
    ) -> Self {
        Self {
            recurrence_type,
            start_date,
            termination,
            frequency: 1,
            relative: false,
            working_days_only: false,
            day_number: None,
            day_of_week: None,
            month_number: None,
            weekly_days: 0,
        }
    }

    /// Step between periods (must be at least 1).
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Match a weekday ordinal instead of a day of month.
    pub fn relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Restrict a daily recurrence to working days.
    pub fn working_days_only(mut self, flag: bool) -> Self {
        self.working_days_only = flag;
        self
    }

    /// Day of month, or weekday ordinal (1–4, 5 = last) when relative.
    pub fn day_number(mut self, n: u32) -> Self {
        self.day_number = Some(n);
        self
    }

    /// Weekday for relative recurrences.
    pub fn day_of_week(mut self, day: Weekday) -> Self {
        self.day_of_week = Some(day);
        self
    }

    /// Month (1–12) for yearly recurrences.
    pub fn month_number(mut self, month: u32) -> Self {
        self.month_number = Some(month);
        self
    }

    /// Select or deselect one weekly day.
    pub fn weekly_day(mut self, day: Weekday, selected: bool) -> Self {
        if selected {
            self.weekly_days |= weekday_bit(day);
        } else {
            self.weekly_days &= !weekday_bit(day);
        }
        self
    }

    /// Select a set of weekly days.
    pub fn weekly_days(self, days: &[Weekday]) -> Self {
        days.iter().fold(self, |b, d| b.weekly_day(*d, true))
    }

    /// Validate and produce the descriptor.
    ///
    /// # Errors
    /// Returns `Error::Precondition` when a field required by the recurrence
    /// type is missing or out of range.
    pub fn build(self) -> Result<RecurringData> {
        ensure!(self.frequency >= 1, "recurrence frequency must be at least 1");
        if let Termination::FinishDate(finish) = self.termination {
            ensure!(
                finish >= self.start_date,
                "finish date {finish} precedes start date {}",
                self.start_date
            );
        }

        let needs_weekday = self.relative
            && matches!(
                self.recurrence_type,
                RecurrenceType::Monthly | RecurrenceType::Yearly
            );
        let day_number = self.day_number.unwrap_or(match self.recurrence_type {
            RecurrenceType::Monthly | RecurrenceType::Yearly if !self.relative => {
                self.start_date.day()
            }
            _ => 1,
        });

        match self.recurrence_type {
            RecurrenceType::Daily => {}
            RecurrenceType::Weekly => {
                ensure!(
                    self.weekly_days != 0,
                    "weekly recurrence needs at least one day"
                );
            }
            RecurrenceType::Monthly | RecurrenceType::Yearly => {
                if self.relative {
                    ensure!(
                        (1..=5).contains(&day_number),
                        "weekday ordinal {day_number} out of range [1, 5]"
                    );
                } else {
                    ensure!(
                        (1..=31).contains(&day_number),
                        "day of month {day_number} out of range [1, 31]"
                    );
                }
            }
        }
        if needs_weekday {
            ensure!(
                self.day_of_week.is_some(),
                "relative recurrence needs a day of week"
            );
        }

        let month_number = self.month_number.unwrap_or(self.start_date.month());
        if self.recurrence_type == RecurrenceType::Yearly {
            ensure!(
                (1..=12).contains(&month_number),
                "month {month_number} out of range [1, 12]"
            );
        }

        Ok(RecurringData {
            recurrence_type: self.recurrence_type,
            start_date: self.start_date,
            termination: self.termination,
            frequency: self.frequency,
            relative: self.relative,
            working_days_only: self.working_days_only,
            day_number,
            day_of_week: self.day_of_week.unwrap_or(self.start_date.weekday()),
            month_number,
            weekly_days: self.weekly_days,
        })
    }
}
