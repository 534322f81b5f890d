//! `CalendarSet` — the per-document registry that owns calendars.
//!
//! Derived calendars refer to their parent by [`CalendarId`]. The registry
//! rejects parent links that are dangling or would form a cycle, so a
//! parent chain always terminates.

use crate::project_calendar::{CalendarView, ProjectCalendar};
use pl_core::errors::{Error, Result};
use pl_core::fail;

/// Handle to a calendar within a [`CalendarSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarId(usize);

impl CalendarId {
    /// Position of the calendar in its registry.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CalendarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns the calendars of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarSet {
    calendars: Vec<ProjectCalendar>,
}

impl CalendarSet {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calendars.
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    /// Add a calendar and return its id.
    ///
    /// # Errors
    /// Fails when the calendar names a parent that is not registered.
    pub fn insert(&mut self, calendar: ProjectCalendar) -> Result<CalendarId> {
        if let Some(parent) = calendar.parent() {
            if parent.0 >= self.calendars.len() {
                return Err(Error::InvalidArgument(format!(
                    "parent calendar {parent} of '{}' is not registered",
                    calendar.name()
                )));
            }
        }
        self.calendars.push(calendar);
        Ok(CalendarId(self.calendars.len() - 1))
    }

    /// The calendar with `id`.
    pub fn get(&self, id: CalendarId) -> Option<&ProjectCalendar> {
        self.calendars.get(id.0)
    }

    /// Mutable access to the calendar with `id`.
    pub fn get_mut(&mut self, id: CalendarId) -> Option<&mut ProjectCalendar> {
        self.calendars.get_mut(id.0)
    }

    /// A query view of the calendar with `id`.
    pub fn view(&self, id: CalendarId) -> Option<CalendarView<'_>> {
        self.get(id).map(|cal| CalendarView::new(cal, self))
    }

    /// The first calendar named `name`.
    pub fn find_by_name(&self, name: &str) -> Option<CalendarId> {
        self.calendars
            .iter()
            .position(|c| c.name() == name)
            .map(CalendarId)
    }

    /// Iterate over `(id, calendar)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarId, &ProjectCalendar)> {
        self.calendars
            .iter()
            .enumerate()
            .map(|(i, c)| (CalendarId(i), c))
    }

    /// Calendars whose parent is `id`.
    pub fn derived_calendars(&self, id: CalendarId) -> Vec<CalendarId> {
        self.iter()
            .filter(|(_, c)| c.parent() == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Set or clear the parent of `child`.
    ///
    /// # Errors
    /// Fails when either id is unknown or the link would create a cycle.
    pub fn set_parent(&mut self, child: CalendarId, parent: Option<CalendarId>) -> Result<()> {
        let size = self.calendars.len();
        if child.0 >= size {
            return Err(Error::IndexOutOfRange {
                index: child.0,
                size,
            });
        }
        if let Some(parent) = parent {
            if parent.0 >= size {
                return Err(Error::IndexOutOfRange {
                    index: parent.0,
                    size,
                });
            }
            let mut cursor = Some(parent);
            while let Some(id) = cursor {
                if id == child {
                    fail!("making {parent} the parent of {child} would create a cycle");
                }
                cursor = self.calendars[id.0].parent();
            }
        }
        self.calendars[child.0].set_parent(parent);
        Ok(())
    }
}
