//! Minutes logged against one task in one sub-unit of a period.

use super::{PeriodAnchor, SubUnit, TrackingDomainError};
use crate::task::domain::{TaskId, TaskSnapshot};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Identity of a time entry: at most one row exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeEntryKey {
    /// Task the minutes were spent on.
    pub task_id: TaskId,
    /// Period the entry belongs to.
    pub anchor: PeriodAnchor,
    /// Slot inside the period.
    pub sub_unit: SubUnit,
}

impl TimeEntryKey {
    /// Creates an entry key.
    #[must_use]
    pub const fn new(task_id: TaskId, anchor: PeriodAnchor, sub_unit: SubUnit) -> Self {
        Self {
            task_id,
            anchor,
            sub_unit,
        }
    }
}

/// A positive number of minutes logged in one sub-unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    key: TimeEntryKey,
    minutes: u32,
    snapshot: TaskSnapshot,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimeEntryData {
    /// Entry identity.
    pub key: TimeEntryKey,
    /// Logged minutes.
    pub minutes: u32,
    /// Names captured when the entry was created.
    pub snapshot: TaskSnapshot,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Creates an entry, validating minutes against the sub-unit capacity.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::ZeroMinutes`] for zero minutes and the
    /// anchor's range or capacity errors otherwise.
    pub fn new(
        key: TimeEntryKey,
        minutes: u32,
        snapshot: TaskSnapshot,
        clock: &impl Clock,
    ) -> Result<Self, TrackingDomainError> {
        validate_minutes(key, minutes)?;
        let timestamp = clock.utc();
        Ok(Self {
            key,
            minutes,
            snapshot,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTimeEntryData) -> Self {
        Self {
            key: data.key,
            minutes: data.minutes,
            snapshot: data.snapshot,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the entry identity.
    #[must_use]
    pub const fn key(&self) -> TimeEntryKey {
        self.key
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.key.task_id
    }

    /// Returns the period anchor.
    #[must_use]
    pub const fn anchor(&self) -> PeriodAnchor {
        self.key.anchor
    }

    /// Returns the sub-unit.
    #[must_use]
    pub const fn sub_unit(&self) -> SubUnit {
        self.key.sub_unit
    }

    /// Returns the logged minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the names captured at creation.
    #[must_use]
    pub const fn snapshot(&self) -> &TaskSnapshot {
        &self.snapshot
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the logged minutes, keeping the snapshot and creation time.
    ///
    /// # Errors
    ///
    /// Same validation as [`TimeEntry::new`].
    pub fn record(&mut self, minutes: u32, clock: &impl Clock) -> Result<(), TrackingDomainError> {
        validate_minutes(self.key, minutes)?;
        self.minutes = minutes;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Takes the minutes and update stamp of a newer write to the same key.
    ///
    /// The snapshot and creation time stay as first stored.
    pub const fn absorb(&mut self, newer: &Self) {
        self.minutes = newer.minutes;
        self.updated_at = newer.updated_at;
    }
}

fn validate_minutes(key: TimeEntryKey, minutes: u32) -> Result<(), TrackingDomainError> {
    if minutes == 0 {
        return Err(TrackingDomainError::ZeroMinutes);
    }
    key.anchor.check_minutes(key.sub_unit, minutes)
}
