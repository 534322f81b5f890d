//! Generic table of date-bounded values.
//!
//! `TimeRangeTable<V>` holds entries ordered by start instant. Entries are
//! expected not to overlap; lookups return the first covering entry. Tables
//! are small (tens of entries per resource) so every query is a linear scan.

use crate::date_time_range::DateTimeRange;
use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

/// One row of a [`TimeRangeTable`]: a value in effect over an inclusive range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRangeEntry<V> {
    /// When the value is in effect.
    pub range: DateTimeRange,
    /// The value itself.
    pub value: V,
}

impl<V> TimeRangeEntry<V> {
    /// Create an entry.
    pub fn new(range: DateTimeRange, value: V) -> Self {
        Self { range, value }
    }

    /// Start bound as supplied (may be absent or NA).
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.range.start
    }

    /// End bound as supplied (may be absent or NA).
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.range.end
    }
}

/// A start-ordered table of date-bounded values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRangeTable<V> {
    entries: Vec<TimeRangeEntry<V>>,
}

impl<V> Default for TimeRangeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<TimeRangeEntry<V>> for TimeRangeTable<V> {
    fn from_iter<I: IntoIterator<Item = TimeRangeEntry<V>>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl<V> TimeRangeTable<V> {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Insert an entry, keeping the table ordered by start. An absent or NA
    /// start sorts first; equal starts keep insertion order.
    pub fn insert(&mut self, entry: TimeRangeEntry<V>) {
        let key = entry.range.bounded_start();
        let at = self
            .entries
            .partition_point(|e| e.range.bounded_start() <= key);
        self.entries.insert(at, entry);
    }

    /// Convenience wrapper around [`insert`](Self::insert).
    pub fn add(&mut self, range: DateTimeRange, value: V) {
        self.insert(TimeRangeEntry::new(range, value));
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, in start order.
    pub fn get(&self, index: usize) -> Option<&TimeRangeEntry<V>> {
        self.entries.get(index)
    }

    /// Iterate over entries in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeRangeEntry<V>> {
        self.entries.iter()
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The entry whose range covers `date` (inclusive at both ends).
    pub fn entry_by_date(&self, date: NaiveDateTime) -> Option<&TimeRangeEntry<V>> {
        self.entries.iter().find(|e| e.range.covers(date))
    }

    /// Index of the entry covering `date`.
    pub fn index_by_date(&self, date: NaiveDateTime) -> Option<usize> {
        self.entries.iter().position(|e| e.range.covers(date))
    }

    /// The instant from which the state at `date` has been known.
    ///
    /// A covering entry reports its own start, or `None` when that start is
    /// unbounded. Otherwise the closest bounded entry ending before `date`
    /// reports midnight of the following day.
    pub fn available_from(&self, date: NaiveDateTime) -> Option<NaiveDateTime> {
        if let Some(entry) = self.entry_by_date(date) {
            return entry.range.bounded_start();
        }

        self.entries
            .iter()
            .filter_map(|e| e.range.bounded_end())
            .filter(|end| *end < date)
            .max()
            .and_then(|end| end.date().succ_opt())
            .map(|day| day.and_time(NaiveTime::MIN))
    }

    /// The instant up to which the state at `date` is known.
    ///
    /// A covering entry reports its own end, or `None` when that end is
    /// unbounded. Otherwise the closest bounded entry starting after `date`
    /// reports one minute before its start.
    pub fn available_to(&self, date: NaiveDateTime) -> Option<NaiveDateTime> {
        if let Some(entry) = self.entry_by_date(date) {
            return entry.range.bounded_end();
        }

        self.entries
            .iter()
            .filter_map(|e| e.range.bounded_start())
            .filter(|start| *start > date)
            .min()
            .map(|start| start - TimeDelta::minutes(1))
    }
}

impl<'a, V> IntoIterator for &'a TimeRangeTable<V> {
    type Item = &'a TimeRangeEntry<V>;
    type IntoIter = std::slice::Iter<'a, TimeRangeEntry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<V> std::ops::Index<usize> for TimeRangeTable<V> {
    type Output = TimeRangeEntry<V>;

    fn index(&self, index: usize) -> &TimeRangeEntry<V> {
        &self.entries[index]
    }
}

impl<V: std::fmt::Display> std::fmt::Display for TimeRangeTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} => {}", entry.range, entry.value)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
