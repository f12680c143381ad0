//! The three fixed life pillars.

use super::ParsePillarError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a day divided evenly across the three pillars.
const DAILY_MINUTES_PER_PILLAR: u32 = 480;

/// Top-level life category. The set is fixed; each pillar receives an equal
/// share of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    /// Professional and deliberate effort.
    HardWork,
    /// Rest, reflection, and health.
    Calmness,
    /// Time with family and close relationships.
    Family,
}

impl Pillar {
    /// All pillars in display order.
    pub const ALL: [Self; 3] = [Self::HardWork, Self::Calmness, Self::Family];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HardWork => "hard_work",
            Self::Calmness => "calmness",
            Self::Family => "family",
        }
    }

    /// Returns the human-readable pillar name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HardWork => "Hard Work",
            Self::Calmness => "Calmness",
            Self::Family => "Family",
        }
    }

    /// Returns the fixed daily time allocation of the pillar in minutes.
    #[must_use]
    pub const fn daily_allocation_minutes(self) -> u32 {
        DAILY_MINUTES_PER_PILLAR
    }
}

impl TryFrom<&str> for Pillar {
    type Error = ParsePillarError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "hard_work" => Ok(Self::HardWork),
            "calmness" => Ok(Self::Calmness),
            "family" => Ok(Self::Family),
            _ => Err(ParsePillarError(value.to_owned())),
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
