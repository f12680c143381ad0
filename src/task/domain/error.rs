//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the 200-character storage limit.
    #[error("task name exceeds 200 character limit: {0}")]
    TaskNameTooLong(String),

    /// The allocation does not fit the persisted integer column.
    #[error("allocated minutes {0} exceed the supported maximum")]
    AllocationTooLarge(u64),

    /// The task has been soft-deleted and can no longer change.
    #[error("task {0} has been deleted")]
    TaskDeleted(TaskId),
}

/// Error returned while parsing a recurrence frequency.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task frequency: {0}")]
pub struct ParseFrequencyError(pub String);
