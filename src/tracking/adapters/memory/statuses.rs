//! In-memory period task-status repository.

use super::lock_error;
use crate::task::domain::TaskId;
use crate::tracking::{
    domain::{PeriodAnchor, TaskPeriodStatus},
    ports::{TaskStatusRepository, TrackingRepositoryResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

pub(super) type StatusKey = (TaskId, PeriodAnchor);

/// Thread-safe in-memory status repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStatusRepository {
    pub(super) state: Arc<RwLock<BTreeMap<StatusKey, TaskPeriodStatus>>>,
}

impl InMemoryTaskStatusRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStatusRepository for InMemoryTaskStatusRepository {
    async fn find(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Option<TaskPeriodStatus>> {
        let statuses = self.state.read().map_err(lock_error)?;
        Ok(statuses.get(&(task_id, anchor)).cloned())
    }

    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Vec<TaskPeriodStatus>> {
        let statuses = self.state.read().map_err(lock_error)?;
        Ok(statuses
            .values()
            .filter(|status| status.anchor() == anchor)
            .cloned()
            .collect())
    }
}
