//! `DateTimeRange` — an inclusive pair of instants with "not applicable"
//! sentinel bounds.
//!
//! Source documents mark an unbounded start or end with a reserved instant
//! rather than leaving the field empty. Both forms mean "unbounded" for
//! coverage tests, but only an absent field means "never supplied".

use chrono::{NaiveDate, NaiveDateTime};

/// Sentinel instant meaning "no lower bound" (1984-01-01 00:00).
pub fn start_na() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1984, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Sentinel instant meaning "no upper bound" (2049-12-31 23:59).
pub fn end_na() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2049, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 0))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Whether `instant` is the start sentinel. Earlier real instants are
/// ordinary bounds.
pub fn is_start_na(instant: NaiveDateTime) -> bool {
    instant == start_na()
}

/// Whether `instant` is the end sentinel. Later real instants are ordinary
/// bounds.
pub fn is_end_na(instant: NaiveDateTime) -> bool {
    instant == end_na()
}

/// An inclusive range of instants. Either bound may be absent (`None`) or
/// carry an NA sentinel; both are treated as unbounded by [`covers`].
///
/// [`covers`]: DateTimeRange::covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeRange {
    /// Lower bound, inclusive.
    pub start: Option<NaiveDateTime>,
    /// Upper bound, inclusive.
    pub end: Option<NaiveDateTime>,
}

impl DateTimeRange {
    /// A range with both bounds supplied.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A range bounded by the two NA sentinels.
    pub fn unbounded() -> Self {
        Self::new(start_na(), end_na())
    }

    /// A range starting at `start` with an NA end.
    pub fn starting(start: NaiveDateTime) -> Self {
        Self::new(start, end_na())
    }

    /// A range with an NA start, ending at `end`.
    pub fn ending(end: NaiveDateTime) -> Self {
        Self::new(start_na(), end)
    }

    /// The start bound if it is a real instant (neither absent nor NA).
    pub fn bounded_start(&self) -> Option<NaiveDateTime> {
        self.start.filter(|s| !is_start_na(*s))
    }

    /// The end bound if it is a real instant (neither absent nor NA).
    pub fn bounded_end(&self) -> Option<NaiveDateTime> {
        self.end.filter(|e| !is_end_na(*e))
    }

    /// Whether the caller supplied a real start bound.
    pub fn has_start(&self) -> bool {
        self.bounded_start().is_some()
    }

    /// Whether the caller supplied a real end bound.
    pub fn has_end(&self) -> bool {
        self.bounded_end().is_some()
    }

    /// Inclusive coverage test; NA and absent bounds are unbounded.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        let after_start = self.bounded_start().map_or(true, |s| s <= instant);
        let before_end = self.bounded_end().map_or(true, |e| instant <= e);
        after_start && before_end
    }

    /// Whether two ranges share at least one instant.
    pub fn overlaps(&self, other: &DateTimeRange) -> bool {
        let starts_before_other_ends = match (self.bounded_start(), other.bounded_end()) {
            (Some(s), Some(e)) => s <= e,
            _ => true,
        };
        let other_starts_before_end = match (other.bounded_start(), self.bounded_end()) {
            (Some(s), Some(e)) => s <= e,
            _ => true,
        };
        starts_before_other_ends && other_starts_before_end
    }
}

impl std::fmt::Display for DateTimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bounded_start() {
            Some(s) => write!(f, "[{}", s.format("%Y-%m-%d %H:%M"))?,
            None => write!(f, "[NA")?,
        }
        match self.bounded_end() {
            Some(e) => write!(f, " - {}]", e.format("%Y-%m-%d %H:%M")),
            None => write!(f, " - NA]"),
        }
    }
}
