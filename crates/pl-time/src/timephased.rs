//! Redistribution of time-phased work and cost across buckets.
//!
//! A time-phased item spreads an amount evenly over the working time between
//! its start and finish. Segmenting a list of items into buckets gives each
//! bucket the share of every item that falls inside it, weighted by the
//! calendar's working time. An item with no working time at all (work
//! recorded outside working hours) is weighted by elapsed time instead.
//!
//! Items and buckets are half-open `[start, end)` and must be ascending and
//! non-overlapping; touching is fine.

use crate::calendar::WorkingCalendar;
use crate::duration::Duration;
use crate::time_unit::TimeUnit;
use crate::timescale::{tick, TimescalePartitioner, TimescaleUnit};
use chrono::{NaiveDateTime, TimeDelta};
use pl_core::date_time_range::DateTimeRange;
use pl_core::errors::{Error, Result};
use tracing::{debug, warn};

/// An amount of work spread over `[start, finish)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimephasedWork {
    /// Start of the period.
    pub start: NaiveDateTime,
    /// End of the period (exclusive).
    pub finish: NaiveDateTime,
    /// Work performed over the whole period.
    pub total_amount: Duration,
}

impl TimephasedWork {
    /// Create an item.
    pub fn new(start: NaiveDateTime, finish: NaiveDateTime, total_amount: Duration) -> Self {
        Self {
            start,
            finish,
            total_amount,
        }
    }
}

/// An amount of cost spread over `[start, finish)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimephasedCost {
    /// Start of the period.
    pub start: NaiveDateTime,
    /// End of the period (exclusive).
    pub finish: NaiveDateTime,
    /// Cost incurred over the whole period.
    pub total_amount: f64,
}

impl TimephasedCost {
    /// Create an item.
    pub fn new(start: NaiveDateTime, finish: NaiveDateTime, total_amount: f64) -> Self {
        Self {
            start,
            finish,
            total_amount,
        }
    }
}

/// Split `items` into `buckets`, expressing each bucket's work in `unit`.
///
/// # Errors
/// Fails when an item or bucket is empty or unbounded, when items or buckets
/// are out of order or overlap, or when items use different units.
pub fn segment_work<C>(
    calendar: &C,
    items: &[TimephasedWork],
    buckets: &[DateTimeRange],
    unit: TimeUnit,
) -> Result<Vec<Duration>>
where
    C: WorkingCalendar + ?Sized,
{
    let spans: Vec<_> = items.iter().map(|i| (i.start, i.finish)).collect();
    check_ordered("timephased item", &spans)?;
    if let Some(first) = items.first() {
        let expected = first.total_amount.unit();
        if let Some(odd) = items.iter().find(|i| i.total_amount.unit() != expected) {
            warn!(%expected, found = %odd.total_amount.unit(), "mixed timephased units");
            return Err(Error::UnitMismatch {
                expected: expected.to_string(),
                found: odd.total_amount.unit().to_string(),
            });
        }
    }
    let bounds = bucket_bounds(buckets)?;

    let defaults = calendar.time_unit_defaults();
    let amounts: Vec<f64> = items
        .iter()
        .map(|i| i.total_amount.convert_units(unit, &defaults).value())
        .collect();
    let shares = apportion(calendar, &spans, &amounts, &bounds);
    debug!(items = items.len(), buckets = bounds.len(), "segmented timephased work");
    Ok(shares.into_iter().map(|v| Duration::new(v, unit)).collect())
}

/// Split cost `items` into `buckets`.
///
/// # Errors
/// Fails when an item or bucket is empty or unbounded, or when items or
/// buckets are out of order or overlap.
pub fn segment_cost<C>(
    calendar: &C,
    items: &[TimephasedCost],
    buckets: &[DateTimeRange],
) -> Result<Vec<f64>>
where
    C: WorkingCalendar + ?Sized,
{
    let spans: Vec<_> = items.iter().map(|i| (i.start, i.finish)).collect();
    check_ordered("timephased item", &spans)?;
    let bounds = bucket_bounds(buckets)?;
    let amounts: Vec<f64> = items.iter().map(|i| i.total_amount).collect();
    debug!(items = items.len(), buckets = bounds.len(), "segmented timephased cost");
    Ok(apportion(calendar, &spans, &amounts, &bounds))
}

/// Partition time with `partitioner` and segment `items` into the result.
///
/// Timescale bucket ends are inclusive, so each is widened by one tick
/// before segmenting.
///
/// # Errors
/// Fails with [`Error::BucketCountMismatch`] when the partition does not
/// hold `count` buckets, and otherwise as [`segment_work`].
#[allow(clippy::too_many_arguments)]
pub fn segment_work_timescale<C>(
    calendar: &C,
    items: &[TimephasedWork],
    partitioner: &TimescalePartitioner,
    anchor: NaiveDateTime,
    timescale_unit: TimescaleUnit,
    count: usize,
    unit: TimeUnit,
) -> Result<Vec<Duration>>
where
    C: WorkingCalendar + ?Sized,
{
    let buckets = partitioner.create_timescale(anchor, timescale_unit, count);
    if buckets.len() != count {
        return Err(Error::BucketCountMismatch {
            expected: count,
            actual: buckets.len(),
        });
    }
    let half_open: Vec<DateTimeRange> = buckets
        .iter()
        .map(|b| DateTimeRange {
            start: b.start,
            end: b.end.map(|e| e + tick()),
        })
        .collect();
    segment_work(calendar, items, &half_open, unit)
}

// ── Internals ────────────────────────────────────────────────────────────────

fn bucket_bounds(buckets: &[DateTimeRange]) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>> {
    let mut bounds = Vec::with_capacity(buckets.len());
    for (i, bucket) in buckets.iter().enumerate() {
        match (bucket.bounded_start(), bucket.bounded_end()) {
            (Some(s), Some(e)) => bounds.push((s, e)),
            _ => {
                return Err(Error::UnorderedRanges(format!(
                    "bucket {i} must have a bounded start and end"
                )))
            }
        }
    }
    check_ordered("bucket", &bounds)?;
    Ok(bounds)
}

fn check_ordered(what: &str, spans: &[(NaiveDateTime, NaiveDateTime)]) -> Result<()> {
    for (i, (start, end)) in spans.iter().enumerate() {
        if start >= end {
            return Err(Error::UnorderedRanges(format!(
                "{what} {i} starts at {start} but ends at {end}"
            )));
        }
    }
    for (i, pair) in spans.windows(2).enumerate() {
        if pair[1].0 < pair[0].1 {
            return Err(Error::UnorderedRanges(format!(
                "{what} {} overlaps or precedes {what} {i}",
                i + 1
            )));
        }
    }
    Ok(())
}

fn ratio(part: TimeDelta, whole: TimeDelta) -> f64 {
    part.num_milliseconds() as f64 / whole.num_milliseconds() as f64
}

fn apportion<C>(
    calendar: &C,
    spans: &[(NaiveDateTime, NaiveDateTime)],
    amounts: &[f64],
    buckets: &[(NaiveDateTime, NaiveDateTime)],
) -> Vec<f64>
where
    C: WorkingCalendar + ?Sized,
{
    let working: Vec<TimeDelta> = spans
        .iter()
        .map(|(s, e)| calendar.working_time_between(*s, *e))
        .collect();

    buckets
        .iter()
        .map(|(bucket_start, bucket_end)| {
            spans
                .iter()
                .zip(amounts)
                .zip(&working)
                .filter_map(|(((start, end), amount), item_working)| {
                    let from = (*start).max(*bucket_start);
                    let to = (*end).min(*bucket_end);
                    if from >= to {
                        return None;
                    }
                    if from == *start && to == *end {
                        return Some(*amount);
                    }
                    let share = if *item_working > TimeDelta::zero() {
                        ratio(calendar.working_time_between(from, to), *item_working)
                    } else {
                        ratio(to - from, *end - *start)
                    };
                    Some(amount * share)
                })
                .sum()
        })
        .collect()
}
