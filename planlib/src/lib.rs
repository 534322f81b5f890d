//! # planlib
//!
//! Calendar and working-time arithmetic for project schedule data: working
//! calendars with exceptions and recurrence, combined calendars, cost rate
//! and availability tables, timescales and time-phased work segmentation.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `pl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! planlib = "0.1"
//! ```
//!
//! ```rust
//! use chrono::NaiveDate;
//! use planlib::time::{Duration, ProjectCalendar, TimeUnit, WorkingCalendar};
//!
//! let calendar = ProjectCalendar::with_default_hours("Standard");
//! let view = calendar.view();
//!
//! let start = NaiveDate::from_ymd_opt(2006, 3, 14).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2006, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let work = view.work_between(start, end, TimeUnit::Days);
//! approx::assert_abs_diff_eq!(work.value(), 1.5, epsilon = 1e-9);
//!
//! let finish = view.date_after(start, Duration::hours(16.0)).unwrap();
//! assert_eq!(finish, NaiveDate::from_ymd_opt(2006, 3, 15).unwrap().and_hms_opt(17, 0, 0).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types: date-time ranges, range tables and error definitions.
pub use pl_core as core;

/// Working calendars, durations, recurrence, timescales and segmentation.
pub use pl_time as time;
