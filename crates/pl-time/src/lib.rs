//! # pl-time
//!
//! Working calendars, durations, recurrence, timescales and time-phased
//! segmentation.
//!
//! The central abstraction is the [`WorkingCalendar`] trait: given the
//! working ranges of a weekday and of a date, it answers how much working
//! time lies between two instants, which instant a duration of work ends at,
//! and so on. [`ProjectCalendar`] (queried through a [`CalendarView`]) and
//! [`CombinedCalendar`] implement it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Resource availability tables.
pub mod availability_table;

/// `WorkingCalendar` trait and the standard week.
pub mod calendar;

/// Explicit and recurring calendar exceptions.
pub mod calendar_exception;

/// Registry owning the calendars of a document.
pub mod calendar_set;

/// Intersection of several calendars.
pub mod combined_calendar;

/// Resource cost rate tables.
pub mod cost_rate_table;

/// Month arithmetic helpers.
pub mod date_ext;

/// `DayType` — working state of a weekday.
pub mod day_type;

/// `Duration` — a quantity of time in a `TimeUnit`.
pub mod duration;

/// `LocalTimeRange` — working time within a day.
pub mod local_time_range;

/// `ProjectCalendar` and `CalendarView`.
pub mod project_calendar;

/// Recurrence descriptors and expansion.
pub mod recurrence;

/// Proportional redistribution of time-phased work and cost.
pub mod timephased;

/// Timescale bucket generation.
pub mod timescale;

/// `TimeUnit` — working and elapsed duration units.
pub mod time_unit;

/// Per-document unit conversion factors.
pub mod time_unit_defaults;

/// Date-ranged alternate weekly patterns.
pub mod work_week;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use availability_table::{Availability, AvailabilityTable};
pub use calendar::{default_working_hours, StandardWeek, WorkingCalendar, MAX_NONWORKING_DAYS};
pub use calendar_exception::{CalendarException, MAX_EXCEPTION_RANGES};
pub use calendar_set::{CalendarId, CalendarSet};
pub use combined_calendar::CombinedCalendar;
pub use cost_rate_table::{CostRate, CostRateTable, CostRateTables, Rate};
pub use day_type::DayType;
pub use duration::Duration;
pub use local_time_range::LocalTimeRange;
pub use project_calendar::{CalendarView, DayEntry, EffectiveException, ProjectCalendar};
pub use recurrence::{RecurrenceType, RecurringData, RecurringDataBuilder, Termination};
pub use time_unit::TimeUnit;
pub use time_unit_defaults::TimeUnitDefaults;
pub use timephased::{segment_cost, segment_work, segment_work_timescale, TimephasedCost, TimephasedWork};
pub use timescale::{TimescalePartitioner, TimescaleUnit};
pub use work_week::WorkWeek;
