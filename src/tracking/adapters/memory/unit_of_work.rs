//! In-memory transactional writes across the tracking stores.

use super::{
    InMemoryPeriodSummaryRepository, InMemoryTaskStatusRepository, InMemoryTimeEntryRepository,
    lock_error,
};
use crate::task::{adapters::memory::InMemoryTaskRepository, domain::TaskId};
use crate::tracking::{
    domain::{PeriodChanges, PeriodSummary},
    ports::{PurgedTask, TrackingRepositoryResult, TrackingUnitOfWork},
};
use async_trait::async_trait;

/// Applies batches to the in-memory stores it shares state with.
///
/// Every write lock a batch needs is taken before the first mutation, so a
/// batch either lands whole or fails before touching anything. Locks are
/// always taken in the order tasks, entries, statuses, summaries.
#[derive(Debug, Clone)]
pub struct InMemoryTrackingUnitOfWork {
    tasks: InMemoryTaskRepository,
    entries: InMemoryTimeEntryRepository,
    statuses: InMemoryTaskStatusRepository,
    summaries: InMemoryPeriodSummaryRepository,
}

impl InMemoryTrackingUnitOfWork {
    /// Creates a unit of work over the given stores.
    #[must_use]
    pub const fn new(
        tasks: InMemoryTaskRepository,
        entries: InMemoryTimeEntryRepository,
        statuses: InMemoryTaskStatusRepository,
        summaries: InMemoryPeriodSummaryRepository,
    ) -> Self {
        Self {
            tasks,
            entries,
            statuses,
            summaries,
        }
    }
}

#[async_trait]
impl TrackingUnitOfWork for InMemoryTrackingUnitOfWork {
    async fn commit_period(
        &self,
        changes: &PeriodChanges,
        summary: &PeriodSummary,
    ) -> TrackingRepositoryResult<()> {
        let mut entries = self.entries.state.write().map_err(lock_error)?;
        let mut statuses = self.statuses.state.write().map_err(lock_error)?;
        let mut summaries = self.summaries.state.write().map_err(lock_error)?;
        let anchor = changes.anchor();

        for key in changes.removed_entries() {
            entries.remove(key);
        }
        for entry in changes.saved_entries() {
            entries
                .entry(entry.key())
                .and_modify(|stored| stored.absorb(entry))
                .or_insert_with(|| entry.clone());
        }
        for task_id in changes.removed_statuses() {
            statuses.remove(&(*task_id, anchor));
        }
        for status in changes.saved_statuses() {
            statuses.insert((status.task_id(), status.anchor()), status.clone());
        }
        summaries.insert(summary.anchor, *summary);
        Ok(())
    }

    async fn purge_task(&self, task_id: TaskId) -> TrackingRepositoryResult<Option<PurgedTask>> {
        let mut tasks = self.tasks.state().write().map_err(lock_error)?;
        let mut entries = self.entries.state.write().map_err(lock_error)?;
        let mut statuses = self.statuses.state.write().map_err(lock_error)?;

        if tasks.remove(&task_id).is_none() {
            return Ok(None);
        }
        let entries_before = entries.len();
        entries.retain(|key, _| key.task_id != task_id);
        let statuses_before = statuses.len();
        statuses.retain(|(owner, _), _| *owner != task_id);

        Ok(Some(PurgedTask {
            entries_removed: count(entries_before - entries.len()),
            statuses_removed: count(statuses_before - statuses.len()),
        }))
    }
}

fn count(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}
