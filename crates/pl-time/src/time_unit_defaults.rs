//! Per-document conversion factors between working-time units.

/// How many working minutes make a day and a week, and how many working days
/// make a month. Source documents each carry their own values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeUnitDefaults {
    /// Working minutes per day.
    pub minutes_per_day: u32,
    /// Working minutes per week.
    pub minutes_per_week: u32,
    /// Working days per month.
    pub days_per_month: u32,
}

impl Default for TimeUnitDefaults {
    fn default() -> Self {
        Self {
            minutes_per_day: 480,
            minutes_per_week: 2400,
            days_per_month: 20,
        }
    }
}

impl TimeUnitDefaults {
    /// Set the working minutes per day.
    pub fn with_minutes_per_day(mut self, minutes: u32) -> Self {
        self.minutes_per_day = minutes;
        self
    }

    /// Set the working minutes per week.
    pub fn with_minutes_per_week(mut self, minutes: u32) -> Self {
        self.minutes_per_week = minutes;
        self
    }

    /// Set the working days per month.
    pub fn with_days_per_month(mut self, days: u32) -> Self {
        self.days_per_month = days;
        self
    }

    /// Working minutes per month.
    pub fn minutes_per_month(&self) -> u64 {
        u64::from(self.minutes_per_day) * u64::from(self.days_per_month)
    }

    /// Working minutes per year (52 working weeks).
    pub fn minutes_per_year(&self) -> u64 {
        u64::from(self.minutes_per_week) * 52
    }
}
