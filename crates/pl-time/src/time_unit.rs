//! `TimeUnit` — the unit attached to a [`Duration`](crate::duration::Duration).
//!
//! Calendar units (minutes through years) measure working time and convert
//! through the per-document [`TimeUnitDefaults`](crate::TimeUnitDefaults).
//! Elapsed units measure wall-clock time and convert with fixed factors.

/// A unit of duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Working minutes.
    Minutes,
    /// Working hours.
    Hours,
    /// Working days.
    Days,
    /// Working weeks.
    Weeks,
    /// Working months.
    Months,
    /// Working years.
    Years,
    /// Elapsed minutes.
    ElapsedMinutes,
    /// Elapsed hours.
    ElapsedHours,
    /// Elapsed days (24 hours).
    ElapsedDays,
    /// Elapsed weeks (7 days).
    ElapsedWeeks,
    /// Elapsed months (30 days).
    ElapsedMonths,
    /// Elapsed years (52 weeks).
    ElapsedYears,
}

impl TimeUnit {
    /// Every unit, calendar units first.
    pub const ALL: [TimeUnit; 12] = [
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Weeks,
        TimeUnit::Months,
        TimeUnit::Years,
        TimeUnit::ElapsedMinutes,
        TimeUnit::ElapsedHours,
        TimeUnit::ElapsedDays,
        TimeUnit::ElapsedWeeks,
        TimeUnit::ElapsedMonths,
        TimeUnit::ElapsedYears,
    ];

    /// Return `true` for units that ignore non-working time.
    pub fn is_elapsed(&self) -> bool {
        matches!(
            self,
            TimeUnit::ElapsedMinutes
                | TimeUnit::ElapsedHours
                | TimeUnit::ElapsedDays
                | TimeUnit::ElapsedWeeks
                | TimeUnit::ElapsedMonths
                | TimeUnit::ElapsedYears
        )
    }

    /// Short abbreviation as used in MPX-style text files.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Years => "y",
            TimeUnit::ElapsedMinutes => "em",
            TimeUnit::ElapsedHours => "eh",
            TimeUnit::ElapsedDays => "ed",
            TimeUnit::ElapsedWeeks => "ew",
            TimeUnit::ElapsedMonths => "emo",
            TimeUnit::ElapsedYears => "ey",
        }
    }

    /// Parse an abbreviation produced by [`abbreviation`](Self::abbreviation).
    pub fn from_abbreviation(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.abbreviation() == s)
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}
