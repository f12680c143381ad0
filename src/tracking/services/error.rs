//! Service-level errors for period tracking.

use crate::task::{domain::TaskId, ports::TaskRepositoryError};
use crate::taxonomy::{domain::CategoryId, ports::TaxonomyRepositoryError};
use crate::tracking::{
    domain::{SubUnit, TrackingDomainError},
    ports::TrackingRepositoryError,
};
use thiserror::Error;

/// Errors returned by the tracking services.
#[derive(Debug, Error)]
pub enum TrackingServiceError {
    /// Period or entry validation failed.
    #[error(transparent)]
    Domain(#[from] TrackingDomainError),

    /// Tracking storage failed.
    #[error(transparent)]
    Repository(#[from] TrackingRepositoryError),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Taxonomy lookup failed.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyRepositoryError),

    /// The referenced task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// Minutes cannot be logged against a soft-deleted task.
    #[error("task {0} has been deleted")]
    TaskRetired(TaskId),

    /// The task's category no longer exists.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// A batch named the same task and sub-unit twice.
    #[error("task {task_id} appears twice for sub-unit {sub_unit}")]
    DuplicateSlot {
        /// Repeated task.
        task_id: TaskId,
        /// Repeated sub-unit.
        sub_unit: SubUnit,
    },

    /// No entry is stored for the task and sub-unit.
    #[error("no entry for task {task_id} in sub-unit {sub_unit}")]
    EntryNotFound {
        /// Requested task.
        task_id: TaskId,
        /// Requested sub-unit.
        sub_unit: SubUnit,
    },
}

/// Result type for tracking service operations.
pub type TrackingServiceResult<T> = Result<T, TrackingServiceError>;
