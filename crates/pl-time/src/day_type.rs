//! `DayType` — the working state of a weekday in a calendar's day model.

/// Working state of a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayType {
    /// The day is worked.
    Working,
    /// The day is not worked.
    NonWorking,
    /// Inherit from the parent calendar.
    #[default]
    Default,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Working => write!(f, "Working"),
            DayType::NonWorking => write!(f, "Non-working"),
            DayType::Default => write!(f, "Default"),
        }
    }
}
