//! Recurrence frequency of a task.

use super::ParseFrequencyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a task expects its allocation to be spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Allocation applies to every day.
    Daily,
    /// Allocation applies to every week.
    Weekly,
    /// Allocation applies to every month.
    Monthly,
    /// Allocation applies to every year.
    Yearly,
    /// A single occurrence, never reconciled against a recurring period.
    OneTime,
    /// Work attached to a project rather than a calendar period.
    ProjectLinked,
}

impl Frequency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::OneTime => "one_time",
            Self::ProjectLinked => "project_linked",
        }
    }

    /// Returns `true` for frequencies that recur on a calendar period.
    #[must_use]
    pub const fn is_recurring(self) -> bool {
        matches!(
            self,
            Self::Daily | Self::Weekly | Self::Monthly | Self::Yearly
        )
    }
}

impl TryFrom<&str> for Frequency {
    type Error = ParseFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "one_time" => Ok(Self::OneTime),
            "project_linked" => Ok(Self::ProjectLinked),
            _ => Err(ParseFrequencyError(value.to_owned())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
