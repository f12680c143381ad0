//! Repository port for per-period task statuses.

use super::TrackingRepositoryResult;
use crate::task::domain::TaskId;
use crate::tracking::domain::{PeriodAnchor, TaskPeriodStatus};
use async_trait::async_trait;

/// Period task-status read contract.
#[async_trait]
pub trait TaskStatusRepository: Send + Sync {
    /// Finds the status of a task in a period.
    async fn find(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Option<TaskPeriodStatus>>;

    /// Lists every status recorded for a period.
    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Vec<TaskPeriodStatus>>;
}
