//! Names of the tables this service reads and writes.

use std::fmt;

/// A table in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    Plots,
    Beds,
    Crops,
    Plantings,
    RecurringTasks,
    ScheduledTasks,
}

impl Table {
    /// The table name as it appears in the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profiles       => "profiles",
            Self::Plots          => "plots",
            Self::Beds           => "beds",
            Self::Crops          => "crops",
            Self::Plantings      => "plantings",
            Self::RecurringTasks => "recurring_tasks",
            Self::ScheduledTasks => "scheduled_tasks",
        }
    }

    /// Whether the store keys this table by UUID rather than a bigint sequence.
    pub fn has_uuid_key(self) -> bool {
        matches!(self, Self::Profiles)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
