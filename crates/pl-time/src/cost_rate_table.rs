//! Resource cost rates over time.
//!
//! Each resource carries five cost rate tables (A to E); an assignment picks
//! one. Every table is a [`TimeRangeTable`] of [`CostRate`] values.

use crate::time_unit::TimeUnit;
use pl_core::date_time_range::DateTimeRange;
use pl_core::errors::{Error, Result};
use pl_core::time_range_table::TimeRangeTable;

/// An amount of money per unit of time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate {
    /// Amount per `unit`.
    pub amount: f64,
    /// The time unit the amount is charged per.
    pub unit: TimeUnit,
}

impl Rate {
    /// Create a rate.
    pub fn new(amount: f64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// A zero hourly rate.
    pub fn zero() -> Self {
        Self::new(0.0, TimeUnit::Hours)
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.amount, self.unit)
    }
}

/// Rates in effect for a resource over one period.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostRate {
    /// Rate charged for regular work.
    pub standard_rate: Rate,
    /// Rate charged for overtime work.
    pub overtime_rate: Rate,
    /// Fixed cost charged once per use of the resource.
    pub cost_per_use: f64,
}

impl Default for CostRate {
    fn default() -> Self {
        Self {
            standard_rate: Rate::zero(),
            overtime_rate: Rate::zero(),
            cost_per_use: 0.0,
        }
    }
}

impl std::fmt::Display for CostRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "standard {} overtime {} per use {}",
            self.standard_rate, self.overtime_rate, self.cost_per_use
        )
    }
}

/// A table of cost rates over time.
pub type CostRateTable = TimeRangeTable<CostRate>;

/// Number of cost rate tables per resource.
pub const COST_RATE_TABLE_COUNT: usize = 5;

/// The five cost rate tables (A to E) of a resource.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostRateTables {
    tables: [CostRateTable; COST_RATE_TABLE_COUNT],
}

impl Default for CostRateTables {
    /// Each table holds one zero-rate entry spanning both NA sentinels.
    fn default() -> Self {
        let table = || {
            let mut t = CostRateTable::new();
            t.add(DateTimeRange::unbounded(), CostRate::default());
            t
        };
        Self {
            tables: [table(), table(), table(), table(), table()],
        }
    }
}

impl CostRateTables {
    /// Table `index` (0 = A … 4 = E).
    pub fn table(&self, index: usize) -> Result<&CostRateTable> {
        self.tables.get(index).ok_or(Error::IndexOutOfRange {
            index,
            size: COST_RATE_TABLE_COUNT,
        })
    }

    /// Mutable table `index` (0 = A … 4 = E).
    pub fn table_mut(&mut self, index: usize) -> Result<&mut CostRateTable> {
        self.tables.get_mut(index).ok_or(Error::IndexOutOfRange {
            index,
            size: COST_RATE_TABLE_COUNT,
        })
    }

    /// Iterate over the tables in order.
    pub fn iter(&self) -> impl Iterator<Item = &CostRateTable> {
        self.tables.iter()
    }
}
