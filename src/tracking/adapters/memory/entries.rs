//! In-memory time-entry repository.

use super::lock_error;
use crate::task::domain::TaskId;
use crate::tracking::{
    domain::{Granularity, PeriodAnchor, TimeEntry, TimeEntryKey},
    ports::{TimeEntryRepository, TrackingRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory time-entry repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeEntryRepository {
    pub(super) state: Arc<RwLock<BTreeMap<TimeEntryKey, TimeEntry>>>,
}

impl InMemoryTimeEntryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimeEntryRepository for InMemoryTimeEntryRepository {
    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
        task_id: Option<TaskId>,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>> {
        let entries = self.state.read().map_err(lock_error)?;
        Ok(entries
            .values()
            .filter(|entry| entry.anchor() == anchor)
            .filter(|entry| task_id.is_none_or(|wanted| entry.task_id() == wanted))
            .cloned()
            .collect())
    }

    async fn find(&self, key: TimeEntryKey) -> TrackingRepositoryResult<Option<TimeEntry>> {
        let entries = self.state.read().map_err(lock_error)?;
        Ok(entries.get(&key).cloned())
    }

    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>> {
        let entries = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<TimeEntry> = entries
            .values()
            .filter(|entry| entry.anchor().granularity() == granularity)
            .filter(|entry| (from..=to).contains(&entry.anchor().date()))
            .cloned()
            .collect();
        matching.sort_by_key(|entry| (entry.anchor(), entry.task_id(), entry.sub_unit()));
        Ok(matching)
    }
}
