//! Transactional write port for period tracking.

use super::TrackingRepositoryResult;
use crate::task::domain::TaskId;
use crate::tracking::domain::{PeriodChanges, PeriodSummary};
use async_trait::async_trait;

/// Rows removed together with a purged task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgedTask {
    /// Time entries removed.
    pub entries_removed: u64,
    /// Period statuses removed.
    pub statuses_removed: u64,
}

/// Write contract whose operations either apply completely or not at all.
#[async_trait]
pub trait TrackingUnitOfWork: Send + Sync {
    /// Applies the staged period writes and stores the summary atomically.
    ///
    /// Saved entries that already exist keep their snapshot and creation
    /// time; only minutes and the update stamp change.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackingRepositoryError::UnknownTask`] when the store
    /// enforces task references and a staged row names a missing task. No
    /// write of the batch is kept on error.
    async fn commit_period(
        &self,
        changes: &PeriodChanges,
        summary: &PeriodSummary,
    ) -> TrackingRepositoryResult<()>;

    /// Removes a task with its entries and period statuses atomically.
    ///
    /// Returns `None` and removes nothing when the task does not exist.
    async fn purge_task(&self, task_id: TaskId) -> TrackingRepositoryResult<Option<PurgedTask>>;
}
