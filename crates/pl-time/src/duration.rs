//! `Duration` — a scalar quantity of time in a [`TimeUnit`].

use crate::time_unit::TimeUnit;
use crate::time_unit_defaults::TimeUnitDefaults;
use chrono::TimeDelta;

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_ELAPSED_DAY: f64 = 1440.0;
const MINUTES_PER_ELAPSED_WEEK: f64 = MINUTES_PER_ELAPSED_DAY * 7.0;
const MINUTES_PER_ELAPSED_MONTH: f64 = MINUTES_PER_ELAPSED_DAY * 30.0;
const MINUTES_PER_ELAPSED_YEAR: f64 = MINUTES_PER_ELAPSED_WEEK * 52.0;

/// Values closer than this compare equal.
const EQUALITY_DELTA: f64 = 0.00001;

/// A span of working or elapsed time.
///
/// Two durations are equal when they share a unit and their values differ by
/// less than `1e-5`; no conversion happens during comparison.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    value: f64,
    unit: TimeUnit,
}

impl Duration {
    /// Create a duration.
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// A zero-length duration in `unit`.
    pub fn zero(unit: TimeUnit) -> Self {
        Self::new(0.0, unit)
    }

    /// Shorthand for a duration in working minutes.
    pub fn minutes(value: f64) -> Self {
        Self::new(value, TimeUnit::Minutes)
    }

    /// Shorthand for a duration in working hours.
    pub fn hours(value: f64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    /// Shorthand for a duration in working days.
    pub fn days(value: f64) -> Self {
        Self::new(value, TimeUnit::Days)
    }

    /// Build a duration from an exact span of wall-clock or working time.
    pub fn from_time_delta(delta: TimeDelta, unit: TimeUnit, defaults: &TimeUnitDefaults) -> Self {
        let minutes = delta.num_milliseconds() as f64 / 60_000.0;
        Self::minutes(minutes).convert_units(unit, defaults)
    }

    /// The scalar value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Whether the value is zero (within tolerance).
    pub fn is_zero(&self) -> bool {
        self.value.abs() < EQUALITY_DELTA
    }

    /// The duration in minutes.
    pub fn to_minutes(&self, defaults: &TimeUnitDefaults) -> f64 {
        self.value * minutes_per_unit(self.unit, defaults)
    }

    /// The duration as an exact span, rounded to the millisecond.
    pub fn to_time_delta(&self, defaults: &TimeUnitDefaults) -> TimeDelta {
        TimeDelta::milliseconds((self.to_minutes(defaults) * 60_000.0).round() as i64)
    }

    /// Convert to `target`. A zero conversion factor yields zero.
    pub fn convert_units(&self, target: TimeUnit, defaults: &TimeUnitDefaults) -> Duration {
        if target == self.unit {
            return *self;
        }
        let divisor = minutes_per_unit(target, defaults);
        let value = if divisor == 0.0 {
            0.0
        } else {
            self.to_minutes(defaults) / divisor
        };
        Duration::new(value, target)
    }

    /// Sum of two durations, expressed in `self`'s unit.
    pub fn add(&self, other: Duration, defaults: &TimeUnitDefaults) -> Duration {
        let rhs = other.convert_units(self.unit, defaults);
        Duration::new(self.value + rhs.value, self.unit)
    }

    /// Difference of two durations, expressed in `self`'s unit.
    pub fn sub(&self, other: Duration, defaults: &TimeUnitDefaults) -> Duration {
        self.add(-other, defaults)
    }

    /// The same duration with the value scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Duration {
        Duration::new(self.value * factor, self.unit)
    }
}

/// Minutes in one `unit`.
pub(crate) fn minutes_per_unit(unit: TimeUnit, defaults: &TimeUnitDefaults) -> f64 {
    match unit {
        TimeUnit::Minutes | TimeUnit::ElapsedMinutes => 1.0,
        TimeUnit::Hours | TimeUnit::ElapsedHours => MINUTES_PER_HOUR,
        TimeUnit::Days => f64::from(defaults.minutes_per_day),
        TimeUnit::Weeks => f64::from(defaults.minutes_per_week),
        TimeUnit::Months => defaults.minutes_per_month() as f64,
        TimeUnit::Years => defaults.minutes_per_year() as f64,
        TimeUnit::ElapsedDays => MINUTES_PER_ELAPSED_DAY,
        TimeUnit::ElapsedWeeks => MINUTES_PER_ELAPSED_WEEK,
        TimeUnit::ElapsedMonths => MINUTES_PER_ELAPSED_MONTH,
        TimeUnit::ElapsedYears => MINUTES_PER_ELAPSED_YEAR,
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && (self.value - other.value).abs() < EQUALITY_DELTA
    }
}

impl std::ops::Neg for Duration {
    type Output = Self;
    fn neg(self) -> Self {
        Duration::new(-self.value, self.unit)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl std::fmt::Debug for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duration({self})")
    }
}
