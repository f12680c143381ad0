//! Task aggregate root and placement types.

use super::{AllocatedMinutes, Frequency, TaskDomainError, TaskId, TaskName, TaskSnapshot};
use crate::taxonomy::domain::{CategoryId, CategoryName, Pillar, SubCategoryId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Where a task sits in the pillar taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskPlacement {
    /// Owning pillar.
    pub pillar: Pillar,
    /// Owning category.
    pub category_id: CategoryId,
    /// Optional sub-category inside the category.
    pub sub_category_id: Option<SubCategoryId>,
}

impl TaskPlacement {
    /// Creates a placement directly under a category.
    #[must_use]
    pub const fn new(pillar: Pillar, category_id: CategoryId) -> Self {
        Self {
            pillar,
            category_id,
            sub_category_id: None,
        }
    }

    /// Narrows the placement to a sub-category.
    #[must_use]
    pub const fn with_sub_category(mut self, sub_category_id: SubCategoryId) -> Self {
        self.sub_category_id = Some(sub_category_id);
        self
    }
}

/// Validated inputs for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task name.
    pub name: TaskName,
    /// Taxonomy placement.
    pub placement: TaskPlacement,
    /// Minutes expected per period.
    pub allocated_minutes: AllocatedMinutes,
    /// Recurrence frequency.
    pub frequency: Frequency,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    placement: TaskPlacement,
    allocated_minutes: AllocatedMinutes,
    frequency: Frequency,
    is_active: bool,
    completed_at: Option<DateTime<Utc>>,
    na_marked_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted placement.
    pub placement: TaskPlacement,
    /// Persisted allocation.
    pub allocated_minutes: AllocatedMinutes,
    /// Persisted frequency.
    pub frequency: Frequency,
    /// Whether the task is active.
    pub is_active: bool,
    /// Global completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Global "not applicable" timestamp.
    pub na_marked_at: Option<DateTime<Utc>>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            name: draft.name,
            placement: draft.placement,
            allocated_minutes: draft.allocated_minutes,
            frequency: draft.frequency,
            is_active: true,
            completed_at: None,
            na_marked_at: None,
            deleted_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            placement: data.placement,
            allocated_minutes: data.allocated_minutes,
            frequency: data.frequency,
            is_active: data.is_active,
            completed_at: data.completed_at,
            na_marked_at: data.na_marked_at,
            deleted_at: data.deleted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the taxonomy placement.
    #[must_use]
    pub const fn placement(&self) -> TaskPlacement {
        self.placement
    }

    /// Returns the owning pillar.
    #[must_use]
    pub const fn pillar(&self) -> Pillar {
        self.placement.pillar
    }

    /// Returns the minutes expected per period.
    #[must_use]
    pub const fn allocated_minutes(&self) -> AllocatedMinutes {
        self.allocated_minutes
    }

    /// Returns the recurrence frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns `true` while the task participates in allocation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns `true` when the task carries a global completion stamp.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns the global completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task carries a global "not applicable" stamp.
    #[must_use]
    pub const fn is_na(&self) -> bool {
        self.na_marked_at.is_some()
    }

    /// Returns the global "not applicable" timestamp, if any.
    #[must_use]
    pub const fn na_marked_at(&self) -> Option<DateTime<Utc>> {
        self.na_marked_at
    }

    /// Returns `true` once the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns the soft-delete timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
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

    /// Returns `true` when a global completion or "not applicable" stamp
    /// dated on or before `date` removes the task from that period.
    #[must_use]
    pub fn is_globally_excluded_on(&self, date: NaiveDate) -> bool {
        let stamped_by = |stamp: Option<DateTime<Utc>>| {
            stamp.is_some_and(|timestamp| timestamp.date_naive() <= date)
        };
        stamped_by(self.completed_at) || stamped_by(self.na_marked_at)
    }

    /// Captures the names an entry should keep for this task.
    #[must_use]
    pub fn snapshot(
        &self,
        category_name: &CategoryName,
        sub_category_name: Option<&CategoryName>,
    ) -> TaskSnapshot {
        TaskSnapshot {
            task_name: self.name.as_str().to_owned(),
            pillar: self.placement.pillar,
            category_name: category_name.as_str().to_owned(),
            sub_category_name: sub_category_name.map(|name| name.as_str().to_owned()),
        }
    }

    /// Renames the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn rename(&mut self, name: TaskName, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.name = name;
        self.touch(clock);
        Ok(())
    }

    /// Changes the minutes expected per period.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn reallocate(
        &mut self,
        allocated_minutes: AllocatedMinutes,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.allocated_minutes = allocated_minutes;
        self.touch(clock);
        Ok(())
    }

    /// Changes the recurrence frequency.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn reschedule(
        &mut self,
        frequency: Frequency,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.frequency = frequency;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to another place in the taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn move_to(
        &mut self,
        placement: TaskPlacement,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.placement = placement;
        self.touch(clock);
        Ok(())
    }

    /// Sets whether the task participates in allocation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn set_active(&mut self, active: bool, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.is_active = active;
        self.touch(clock);
        Ok(())
    }

    /// Stamps global completion, clearing any "not applicable" stamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        let timestamp = clock.utc();
        self.completed_at = Some(timestamp);
        self.na_marked_at = None;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Stamps the task globally "not applicable", clearing completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn mark_na(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        let timestamp = clock.utc();
        self.na_marked_at = Some(timestamp);
        self.completed_at = None;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Clears both global stamps so the task counts again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] for a soft-deleted task.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        self.completed_at = None;
        self.na_marked_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Retires the task: it stops counting toward allocation while logged
    /// entries stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] when already soft-deleted.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_deleted()?;
        let timestamp = clock.utc();
        self.is_active = false;
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    fn ensure_not_deleted(&self) -> Result<(), TaskDomainError> {
        if self.deleted_at.is_some() {
            return Err(TaskDomainError::TaskDeleted(self.id));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
