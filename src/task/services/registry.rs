//! Task registry orchestration: creation, edits, and lifecycle stamps.

use crate::task::{
    domain::{
        AllocatedMinutes, Frequency, Task, TaskDomainError, TaskDraft, TaskId, TaskName,
        TaskPlacement,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use crate::taxonomy::{
    domain::{CategoryId, Pillar, SubCategoryId},
    ports::{TaxonomyRepository, TaxonomyRepositoryError},
};
use crate::tracking::ports::{TrackingRepositoryError, TrackingUnitOfWork};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    placement: TaskPlacement,
    allocated_minutes: u64,
    frequency: Frequency,
}

impl CreateTaskRequest {
    /// Creates a request with every required field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        placement: TaskPlacement,
        allocated_minutes: u64,
        frequency: Frequency,
    ) -> Self {
        Self {
            name: name.into(),
            placement,
            allocated_minutes,
            frequency,
        }
    }
}

/// Partial update of a task; unset fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    allocated_minutes: Option<u64>,
    frequency: Option<Frequency>,
    placement: Option<TaskPlacement>,
    active: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the minutes expected per period.
    #[must_use]
    pub const fn with_allocated_minutes(mut self, minutes: u64) -> Self {
        self.allocated_minutes = Some(minutes);
        self
    }

    /// Changes the recurrence frequency.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Moves the task in the taxonomy.
    #[must_use]
    pub const fn with_placement(mut self, placement: TaskPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Activates or deactivates the task.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Rows removed alongside a hard-deleted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardDeleteOutcome {
    /// Removed task.
    pub task_id: TaskId,
    /// Time entries removed.
    pub entries_removed: u64,
    /// Period statuses removed.
    pub statuses_removed: u64,
}

/// Errors returned by the task registry.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// Task validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task storage failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Taxonomy lookup failed.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyRepositoryError),

    /// Purging the task with its tracking rows failed.
    #[error(transparent)]
    Tracking(#[from] TrackingRepositoryError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The placement names a category that does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// The category belongs to a different pillar than the placement.
    #[error("category {category_id} belongs to {actual}, not {expected}")]
    CategoryPillarMismatch {
        /// Placed category.
        category_id: CategoryId,
        /// Pillar named by the placement.
        expected: Pillar,
        /// Pillar the category belongs to.
        actual: Pillar,
    },

    /// The placement names a sub-category that does not exist.
    #[error("unknown sub-category: {0}")]
    UnknownSubCategory(SubCategoryId),

    /// The sub-category belongs to a different category.
    #[error("sub-category {sub_category_id} is not part of category {category_id}")]
    SubCategoryMismatch {
        /// Placed sub-category.
        sub_category_id: SubCategoryId,
        /// Placed category.
        category_id: CategoryId,
    },
}

/// Result type for task registry operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task registry orchestration service.
pub struct TaskRegistryService<C>
where
    C: Clock + Send + Sync,
{
    taxonomy: Arc<dyn TaxonomyRepository>,
    tasks: Arc<dyn TaskRepository>,
    unit_of_work: Arc<dyn TrackingUnitOfWork>,
    clock: Arc<C>,
}

impl<C> TaskRegistryService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a task registry service.
    #[must_use]
    pub fn new(
        taxonomy: Arc<dyn TaxonomyRepository>,
        tasks: Arc<dyn TaskRepository>,
        unit_of_work: Arc<dyn TrackingUnitOfWork>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            taxonomy,
            tasks,
            unit_of_work,
            clock,
        }
    }

    /// Creates a task after validating its placement.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError`] for invalid names or allocations, for a
    /// placement the taxonomy rejects, or when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskRegistryResult<Task> {
        let CreateTaskRequest {
            name,
            placement,
            allocated_minutes,
            frequency,
        } = request;

        let draft = TaskDraft {
            name: TaskName::new(name)?,
            placement,
            allocated_minutes: AllocatedMinutes::new(allocated_minutes)?,
            frequency,
        };
        self.validate_placement(placement).await?;

        let task = Task::new(draft, &*self.clock);
        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            pillar = %task.pillar(),
            frequency = %task.frequency(),
            "task created"
        );
        Ok(task)
    }

    /// Finds a task by identifier, soft-deleted tasks included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn find(&self, id: TaskId) -> TaskRegistryResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists tasks matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when lookup fails.
    pub async fn list(&self, query: TaskQuery) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.tasks.list(query).await?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] for a missing task,
    /// [`TaskDomainError::TaskDeleted`] for a soft-deleted one, and
    /// validation errors for invalid fields or placement.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskRegistryResult<Task> {
        let mut task = self.get(id).await?;
        let clock = &*self.clock;

        if let Some(name) = request.name {
            task.rename(TaskName::new(name)?, clock)?;
        }
        if let Some(minutes) = request.allocated_minutes {
            task.reallocate(AllocatedMinutes::new(minutes)?, clock)?;
        }
        if let Some(frequency) = request.frequency {
            task.reschedule(frequency, clock)?;
        }
        if let Some(placement) = request.placement {
            self.validate_placement(placement).await?;
            task.move_to(placement, clock)?;
        }
        if let Some(active) = request.active {
            task.set_active(active, clock)?;
        }

        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Stamps global completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] or
    /// [`TaskDomainError::TaskDeleted`].
    pub async fn complete(&self, id: TaskId) -> TaskRegistryResult<Task> {
        let mut task = self.get(id).await?;
        task.complete(&*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task completed");
        Ok(task)
    }

    /// Stamps the task globally "not applicable".
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] or
    /// [`TaskDomainError::TaskDeleted`].
    pub async fn mark_na(&self, id: TaskId) -> TaskRegistryResult<Task> {
        let mut task = self.get(id).await?;
        task.mark_na(&*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task marked not applicable");
        Ok(task)
    }

    /// Clears both global stamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] or
    /// [`TaskDomainError::TaskDeleted`].
    pub async fn reopen(&self, id: TaskId) -> TaskRegistryResult<Task> {
        let mut task = self.get(id).await?;
        task.reopen(&*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task reopened");
        Ok(task)
    }

    /// Retires a task while keeping its logged entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] or
    /// [`TaskDomainError::TaskDeleted`] when already retired.
    pub async fn soft_delete(&self, id: TaskId) -> TaskRegistryResult<Task> {
        let mut task = self.get(id).await?;
        task.soft_delete(&*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task soft-deleted");
        Ok(task)
    }

    /// Removes a task together with its entries and period statuses in one
    /// unit; a failure leaves all three untouched.
    ///
    /// Cached summaries are left as they are; the next reconciliation of an
    /// affected period refreshes them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] for a missing task or a
    /// storage error.
    pub async fn hard_delete(&self, id: TaskId) -> TaskRegistryResult<HardDeleteOutcome> {
        let purged = self
            .unit_of_work
            .purge_task(id)
            .await?
            .ok_or(TaskRegistryError::NotFound(id))?;
        info!(
            task_id = %id,
            entries_removed = purged.entries_removed,
            statuses_removed = purged.statuses_removed,
            "task hard-deleted"
        );
        Ok(HardDeleteOutcome {
            task_id: id,
            entries_removed: purged.entries_removed,
            statuses_removed: purged.statuses_removed,
        })
    }

    async fn get(&self, id: TaskId) -> TaskRegistryResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskRegistryError::NotFound(id))
    }

    async fn validate_placement(&self, placement: TaskPlacement) -> TaskRegistryResult<()> {
        let category = self
            .taxonomy
            .find_category(placement.category_id)
            .await?
            .ok_or(TaskRegistryError::UnknownCategory(placement.category_id))?;
        if category.pillar() != placement.pillar {
            return Err(TaskRegistryError::CategoryPillarMismatch {
                category_id: category.id(),
                expected: placement.pillar,
                actual: category.pillar(),
            });
        }

        let Some(sub_category_id) = placement.sub_category_id else {
            return Ok(());
        };
        let sub_category = self
            .taxonomy
            .find_sub_category(sub_category_id)
            .await?
            .ok_or(TaskRegistryError::UnknownSubCategory(sub_category_id))?;
        if sub_category.category_id() != category.id() {
            return Err(TaskRegistryError::SubCategoryMismatch {
                sub_category_id,
                category_id: category.id(),
            });
        }
        Ok(())
    }
}
