//! `LocalTimeRange` — a span of working time within a single day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// A time-of-day range. An end of `00:00` means midnight at the end of the
/// day, so `00:00–00:00` covers the whole day. An end earlier than the start
/// is treated as running to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalTimeRange {
    /// Start of the range.
    pub start: NaiveTime,
    /// End of the range; `00:00` is midnight.
    pub end: NaiveTime,
}

fn day() -> TimeDelta {
    TimeDelta::days(1)
}

fn time_at(offset: TimeDelta) -> NaiveTime {
    if offset >= day() {
        NaiveTime::MIN
    } else {
        NaiveTime::MIN + offset
    }
}

impl LocalTimeRange {
    /// Create a range.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Create a range from minutes after midnight; `1440` is midnight.
    pub fn from_minutes(start: u32, end: u32) -> Self {
        Self {
            start: time_at(TimeDelta::minutes(i64::from(start))),
            end: time_at(TimeDelta::minutes(i64::from(end))),
        }
    }

    /// The whole day, `00:00–00:00`.
    pub fn full_day() -> Self {
        Self::new(NaiveTime::MIN, NaiveTime::MIN)
    }

    /// Offset of the start from midnight.
    pub fn start_offset(&self) -> TimeDelta {
        self.start - NaiveTime::MIN
    }

    /// Offset of the end from the preceding midnight, up to 24 hours.
    pub fn end_offset(&self) -> TimeDelta {
        if self.end == NaiveTime::MIN || self.end < self.start {
            day()
        } else {
            self.end - NaiveTime::MIN
        }
    }

    /// Length of the range.
    pub fn length(&self) -> TimeDelta {
        self.end_offset() - self.start_offset()
    }

    /// Whether `time` falls within `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let offset = time - NaiveTime::MIN;
        self.start_offset() <= offset && offset < self.end_offset()
    }

    /// The overlap of two ranges, if it is not empty.
    pub fn intersect(&self, other: &LocalTimeRange) -> Option<LocalTimeRange> {
        let start = self.start_offset().max(other.start_offset());
        let end = self.end_offset().min(other.end_offset());
        (start < end).then(|| LocalTimeRange::new(time_at(start), time_at(end)))
    }

    /// The absolute instants this range covers on `date`.
    pub fn on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = date.and_time(NaiveTime::MIN);
        (midnight + self.start_offset(), midnight + self.end_offset())
    }
}

impl std::fmt::Display for LocalTimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Total length of a set of ranges.
pub fn total_length(ranges: &[LocalTimeRange]) -> TimeDelta {
    ranges
        .iter()
        .fold(TimeDelta::zero(), |acc, r| acc + r.length())
}

/// Pairwise intersection of two range sets.
pub fn intersect_all(a: &[LocalTimeRange], b: &[LocalTimeRange]) -> Vec<LocalTimeRange> {
    let mut result: Vec<LocalTimeRange> = a
        .iter()
        .flat_map(|x| b.iter().filter_map(move |y| x.intersect(y)))
        .collect();
    result.sort_by_key(|r| r.start_offset());
    result
}
