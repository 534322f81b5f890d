//! # pl-core
//!
//! Core types and error definitions for planlib-rs.
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace: the error hierarchy, the `DateTimeRange` type with its
//! "not applicable" sentinels, and the generic `TimeRangeTable` used for
//! cost rates and resource availability.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Inclusive date-time ranges and the NA sentinel bounds.
pub mod date_time_range;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Generic table of date-bounded values.
pub mod time_range_table;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use date_time_range::{end_na, is_end_na, is_start_na, start_na, DateTimeRange};
pub use errors::{Error, Result};
pub use time_range_table::{TimeRangeEntry, TimeRangeTable};
