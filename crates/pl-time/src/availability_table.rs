//! Resource availability over time.

use pl_core::time_range_table::TimeRangeTable;

/// Maximum units of a resource available over one period, as a percentage
/// (100.0 = one full-time unit).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Availability {
    /// Available units, in percent.
    pub units: f64,
}

impl Availability {
    /// Create an availability value.
    pub fn new(units: f64) -> Self {
        Self { units }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.units)
    }
}

/// A table of resource availability over time.
pub type AvailabilityTable = TimeRangeTable<Availability>;
