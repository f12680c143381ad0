//! Calendar granularity of a tracked period.

use super::ParseGranularityError;
use crate::task::domain::Frequency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a tracked period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One calendar day, split into hour slots.
    Daily,
    /// Monday to Sunday, split into days.
    Weekly,
    /// One calendar month, split into days.
    Monthly,
    /// One calendar year, split into months.
    Yearly,
}

impl Granularity {
    /// Every granularity, shortest first.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Returns the canonical storage and URL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Returns the task frequency whose allocation applies to this period.
    #[must_use]
    pub const fn frequency(self) -> Frequency {
        match self {
            Self::Daily => Frequency::Daily,
            Self::Weekly => Frequency::Weekly,
            Self::Monthly => Frequency::Monthly,
            Self::Yearly => Frequency::Yearly,
        }
    }

    /// Maps a recurring task frequency to its period granularity.
    #[must_use]
    pub const fn for_frequency(frequency: Frequency) -> Option<Self> {
        match frequency {
            Frequency::Daily => Some(Self::Daily),
            Frequency::Weekly => Some(Self::Weekly),
            Frequency::Monthly => Some(Self::Monthly),
            Frequency::Yearly => Some(Self::Yearly),
            Frequency::OneTime | Frequency::ProjectLinked => None,
        }
    }
}

impl TryFrom<&str> for Granularity {
    type Error = ParseGranularityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(ParseGranularityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
