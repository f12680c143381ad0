//! Per-period task status transitions.

use super::{ReconciliationService, TrackingServiceError, TrackingServiceResult};
use crate::task::{domain::TaskId, ports::TaskRepository};
use crate::tracking::{
    domain::{PeriodAnchor, PeriodChanges, PeriodSummary, TaskPeriodStatus},
    ports::TaskStatusRepository,
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Status of a task after a transition, with the refreshed period summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusOutcome {
    /// Stored status, or `None` after a reset.
    pub status: Option<TaskPeriodStatus>,
    /// Summary of the period after the transition.
    pub summary: PeriodSummary,
}

/// Applies completion and "not applicable" overrides per period.
///
/// Every transition is last-write-wins and commits together with the
/// refreshed period summary.
pub struct TaskStatusService<C>
where
    C: Clock + Send + Sync,
{
    tasks: Arc<dyn TaskRepository>,
    statuses: Arc<dyn TaskStatusRepository>,
    reconciler: Arc<ReconciliationService<C>>,
    clock: Arc<C>,
}

impl<C> TaskStatusService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a status service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        statuses: Arc<dyn TaskStatusRepository>,
        reconciler: Arc<ReconciliationService<C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            statuses,
            reconciler,
            clock,
        }
    }

    /// Returns the stored status of a task in a period.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::UnknownTask`] when the task is missing.
    pub async fn status(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<Option<TaskPeriodStatus>> {
        self.ensure_task(task_id).await?;
        Ok(self.statuses.find(task_id, anchor).await?)
    }

    /// Returns the stored status, creating a tracked one when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::UnknownTask`] when the task is missing.
    pub async fn track(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<StatusOutcome> {
        let status = self.load_or_track(task_id, anchor).await?;
        self.save(status).await
    }

    /// Marks the task completed for the period.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::UnknownTask`] when the task is missing.
    pub async fn mark_complete(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<StatusOutcome> {
        let mut status = self.load_or_track(task_id, anchor).await?;
        status.complete(&*self.clock);
        let outcome = self.save(status).await?;
        info!(task_id = %task_id, period = %anchor, "task completed for period");
        Ok(outcome)
    }

    /// Marks the task not applicable for the period.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::UnknownTask`] when the task is missing.
    pub async fn mark_na(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<StatusOutcome> {
        let mut status = self.load_or_track(task_id, anchor).await?;
        status.mark_na(&*self.clock);
        let outcome = self.save(status).await?;
        info!(task_id = %task_id, period = %anchor, "task marked not applicable for period");
        Ok(outcome)
    }

    /// Drops any override so the task counts by default again.
    ///
    /// Resetting a task without a stored status succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::UnknownTask`] when the task is missing.
    pub async fn reset(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<StatusOutcome> {
        self.ensure_task(task_id).await?;
        let mut changes = PeriodChanges::new(anchor);
        let existed = self.statuses.find(task_id, anchor).await?.is_some();
        if existed {
            changes.remove_status(task_id);
        }
        let summary = self.reconciler.commit(changes).await?;
        if existed {
            info!(task_id = %task_id, period = %anchor, "period status reset");
        }
        Ok(StatusOutcome {
            status: None,
            summary,
        })
    }

    async fn load_or_track(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingServiceResult<TaskPeriodStatus> {
        self.ensure_task(task_id).await?;
        Ok(self
            .statuses
            .find(task_id, anchor)
            .await?
            .unwrap_or_else(|| TaskPeriodStatus::tracked(task_id, anchor, &*self.clock)))
    }

    async fn ensure_task(&self, task_id: TaskId) -> TrackingServiceResult<()> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .map(|_| ())
            .ok_or(TrackingServiceError::UnknownTask(task_id))
    }

    async fn save(&self, status: TaskPeriodStatus) -> TrackingServiceResult<StatusOutcome> {
        let mut changes = PeriodChanges::new(status.anchor());
        changes.save_status(status.clone());
        let summary = self.reconciler.commit(changes).await?;
        Ok(StatusOutcome {
            status: Some(status),
            summary,
        })
    }
}
