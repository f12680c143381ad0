//! Errors shared by the tracking repositories.

use crate::task::domain::TaskId;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracking repository operations.
pub type TrackingRepositoryResult<T> = Result<T, TrackingRepositoryError>;

/// Errors returned by tracking repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackingRepositoryError {
    /// A row referenced a task the store does not hold.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
