//! Repository port for period time entries.

use super::TrackingRepositoryResult;
use crate::task::domain::TaskId;
use crate::tracking::domain::{Granularity, PeriodAnchor, TimeEntry, TimeEntryKey};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Time-entry read contract.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    /// Lists the entries of one period ordered by task then sub-unit,
    /// optionally restricted to one task.
    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
        task_id: Option<TaskId>,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>>;

    /// Finds the entry stored under a key.
    async fn find(&self, key: TimeEntryKey) -> TrackingRepositoryResult<Option<TimeEntry>>;

    /// Lists entries of the granularity whose anchor date lies in
    /// `from..=to`.
    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>>;
}
