//! Repository port for task persistence and lookup.

use crate::task::domain::{Frequency, Task, TaskId};
use crate::taxonomy::domain::{CategoryId, Pillar};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Filter applied when listing tasks.
///
/// The default query returns active tasks of every frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Restricts results to one frequency.
    pub frequency: Option<Frequency>,
    /// Restricts results to one pillar.
    pub pillar: Option<Pillar>,
    /// Restricts results to one category.
    pub category_id: Option<CategoryId>,
    /// Includes inactive and soft-deleted tasks when set.
    pub include_inactive: bool,
}

impl TaskQuery {
    /// Active tasks of the given frequency: the reconciler's input set.
    #[must_use]
    pub const fn active_with_frequency(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            pillar: None,
            category_id: None,
            include_inactive: false,
        }
    }

    /// Returns `true` when the task satisfies every filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        (self.include_inactive || task.is_active())
            && self.frequency.is_none_or(|wanted| task.frequency() == wanted)
            && self.pillar.is_none_or(|wanted| task.pillar() == wanted)
            && self
                .category_id
                .is_none_or(|wanted| task.placement().category_id == wanted)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, including soft-deleted tasks.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching the query, ordered by creation time.
    async fn list(&self, query: TaskQuery) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
