//! Per-period overrides of a task's allocation.

use super::PeriodAnchor;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// State of a task inside one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PeriodTaskState {
    /// The task counts with its full allocation.
    Tracked,
    /// The task is done for the period and drops out of the allocation.
    Completed {
        /// When the period completion was recorded.
        completed_at: DateTime<Utc>,
    },
    /// The task does not apply to the period.
    NotApplicable,
}

impl PeriodTaskState {
    /// Returns the storage representation of the state tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tracked => "tracked",
            Self::Completed { .. } => "completed",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Returns `true` for the completed state.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns `true` for the not-applicable state.
    #[must_use]
    pub const fn is_na(self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// Returns `true` when the state removes the task from the allocation.
    #[must_use]
    pub const fn excludes_allocation(self) -> bool {
        !matches!(self, Self::Tracked)
    }

    /// Returns the completion timestamp for the completed state.
    #[must_use]
    pub const fn completed_at(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Completed { completed_at } => Some(completed_at),
            Self::Tracked | Self::NotApplicable => None,
        }
    }
}

/// Override row for one task in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPeriodStatus {
    task_id: TaskId,
    anchor: PeriodAnchor,
    state: PeriodTaskState,
    updated_at: DateTime<Utc>,
}

impl TaskPeriodStatus {
    /// Creates a status in the [`PeriodTaskState::Tracked`] state.
    #[must_use]
    pub fn tracked(task_id: TaskId, anchor: PeriodAnchor, clock: &impl Clock) -> Self {
        Self::from_persisted(task_id, anchor, PeriodTaskState::Tracked, clock.utc())
    }

    /// Reconstructs a status from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        task_id: TaskId,
        anchor: PeriodAnchor,
        state: PeriodTaskState,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            anchor,
            state,
            updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the period anchor.
    #[must_use]
    pub const fn anchor(&self) -> PeriodAnchor {
        self.anchor
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PeriodTaskState {
        self.state
    }

    /// Returns `true` when the task is completed for the period.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Returns `true` when the task is not applicable for the period.
    #[must_use]
    pub const fn is_na(&self) -> bool {
        self.state.is_na()
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the task completed for the period, replacing any NA state.
    pub fn complete(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.state = PeriodTaskState::Completed {
            completed_at: timestamp,
        };
        self.updated_at = timestamp;
    }

    /// Marks the task not applicable, clearing any completion.
    pub fn mark_na(&mut self, clock: &impl Clock) {
        self.state = PeriodTaskState::NotApplicable;
        self.updated_at = clock.utc();
    }
}
