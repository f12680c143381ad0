//! Time-entry logging with batch validation.

use super::{ReconciliationService, TrackingServiceError, TrackingServiceResult};
use crate::task::{
    domain::{Task, TaskId, TaskSnapshot},
    ports::TaskRepository,
};
use crate::taxonomy::ports::TaxonomyRepository;
use crate::tracking::{
    domain::{PeriodAnchor, PeriodChanges, PeriodSummary, SubUnit, TimeEntry, TimeEntryKey},
    ports::TimeEntryRepository,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// One `(task, sub-unit, minutes)` triple of a bulk save.
///
/// Zero minutes remove the stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    /// Task the minutes belong to.
    pub task_id: TaskId,
    /// Slot inside the period.
    pub sub_unit: SubUnit,
    /// Minutes spent; zero deletes.
    pub minutes: u32,
}

impl EntryInput {
    /// Creates an entry input.
    #[must_use]
    pub const fn new(task_id: TaskId, sub_unit: SubUnit, minutes: u32) -> Self {
        Self {
            task_id,
            sub_unit,
            minutes,
        }
    }
}

/// Result of a bulk save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkSaveOutcome {
    /// Entries inserted or updated.
    pub saved: usize,
    /// Entries removed by zero-minute triples.
    pub deleted: usize,
    /// Summary of the period after the save.
    pub summary: PeriodSummary,
}

/// Logs minutes against tasks and keeps the period summary current.
pub struct TimeEntryService<C>
where
    C: Clock + Send + Sync,
{
    taxonomy: Arc<dyn TaxonomyRepository>,
    tasks: Arc<dyn TaskRepository>,
    entries: Arc<dyn TimeEntryRepository>,
    reconciler: Arc<ReconciliationService<C>>,
    clock: Arc<C>,
}

impl<C> TimeEntryService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a time-entry service.
    #[must_use]
    pub fn new(
        taxonomy: Arc<dyn TaxonomyRepository>,
        tasks: Arc<dyn TaskRepository>,
        entries: Arc<dyn TimeEntryRepository>,
        reconciler: Arc<ReconciliationService<C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            taxonomy,
            tasks,
            entries,
            reconciler,
            clock,
        }
    }

    /// Lists the entries of a period, optionally for one task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::Repository`] when the store fails.
    pub async fn entries(
        &self,
        anchor: PeriodAnchor,
        task_id: Option<TaskId>,
    ) -> TrackingServiceResult<Vec<TimeEntry>> {
        Ok(self.entries.list_for_period(anchor, task_id).await?)
    }

    /// Validates the whole batch, then commits it with the refreshed period
    /// summary as one unit.
    ///
    /// Existing entries keep their snapshot and creation time. Nothing is
    /// written when any triple fails validation or the commit fails.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError`] for unknown or retired tasks,
    /// out-of-range sub-units, minutes above capacity, repeated slots, or
    /// store failures.
    pub async fn bulk_save(
        &self,
        anchor: PeriodAnchor,
        inputs: Vec<EntryInput>,
    ) -> TrackingServiceResult<BulkSaveOutcome> {
        let tasks = self.validate_batch(anchor, &inputs).await?;
        let stored: HashMap<TimeEntryKey, TimeEntry> = self
            .entries
            .list_for_period(anchor, None)
            .await?
            .into_iter()
            .map(|entry| (entry.key(), entry))
            .collect();
        let mut snapshots: HashMap<TaskId, TaskSnapshot> = HashMap::new();
        let mut changes = PeriodChanges::new(anchor);
        let mut saved = 0;
        let mut deleted = 0;

        for input in inputs {
            let key = TimeEntryKey::new(input.task_id, anchor, input.sub_unit);
            if input.minutes == 0 {
                if stored.contains_key(&key) {
                    changes.remove_entry(key);
                    deleted += 1;
                }
                continue;
            }

            let entry = match stored.get(&key) {
                Some(existing) => {
                    let mut updated = existing.clone();
                    updated.record(input.minutes, &*self.clock)?;
                    updated
                }
                None => {
                    let snapshot = match snapshots.get(&input.task_id) {
                        Some(cached) => cached.clone(),
                        None => {
                            let task = tasks
                                .get(&input.task_id)
                                .ok_or(TrackingServiceError::UnknownTask(input.task_id))?;
                            let fresh = self.snapshot_for(task).await?;
                            snapshots.insert(input.task_id, fresh.clone());
                            fresh
                        }
                    };
                    TimeEntry::new(key, input.minutes, snapshot, &*self.clock)?
                }
            };
            changes.save_entry(entry);
            saved += 1;
        }

        let summary = self.reconciler.commit(changes).await?;
        info!(period = %anchor, saved, deleted, "time entries saved");
        Ok(BulkSaveOutcome {
            saved,
            deleted,
            summary,
        })
    }

    /// Removes one entry and refreshes the period summary in the same unit.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingServiceError::EntryNotFound`] when no entry is
    /// stored for the slot.
    pub async fn delete_entry(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
        sub_unit: SubUnit,
    ) -> TrackingServiceResult<PeriodSummary> {
        anchor.capacity(sub_unit)?;
        let key = TimeEntryKey::new(task_id, anchor, sub_unit);
        if self.entries.find(key).await?.is_none() {
            return Err(TrackingServiceError::EntryNotFound { task_id, sub_unit });
        }
        let mut changes = PeriodChanges::new(anchor);
        changes.remove_entry(key);
        let summary = self.reconciler.commit(changes).await?;
        info!(period = %anchor, task_id = %task_id, sub_unit = %sub_unit, "time entry deleted");
        Ok(summary)
    }

    async fn validate_batch(
        &self,
        anchor: PeriodAnchor,
        inputs: &[EntryInput],
    ) -> TrackingServiceResult<HashMap<TaskId, Task>> {
        let mut seen = HashSet::new();
        let mut tasks: HashMap<TaskId, Task> = HashMap::new();

        for input in inputs {
            if !seen.insert((input.task_id, input.sub_unit)) {
                return Err(TrackingServiceError::DuplicateSlot {
                    task_id: input.task_id,
                    sub_unit: input.sub_unit,
                });
            }
            anchor.check_minutes(input.sub_unit, input.minutes)?;

            if !tasks.contains_key(&input.task_id) {
                let task = self
                    .tasks
                    .find_by_id(input.task_id)
                    .await?
                    .ok_or(TrackingServiceError::UnknownTask(input.task_id))?;
                tasks.insert(input.task_id, task);
            }
            let retired = tasks
                .get(&input.task_id)
                .is_some_and(Task::is_deleted);
            if retired && input.minutes > 0 {
                return Err(TrackingServiceError::TaskRetired(input.task_id));
            }
        }
        Ok(tasks)
    }

    async fn snapshot_for(&self, task: &Task) -> TrackingServiceResult<TaskSnapshot> {
        let placement = task.placement();
        let category = self
            .taxonomy
            .find_category(placement.category_id)
            .await?
            .ok_or(TrackingServiceError::UnknownCategory(placement.category_id))?;
        let sub_category = match placement.sub_category_id {
            Some(id) => self.taxonomy.find_sub_category(id).await?,
            None => None,
        };
        Ok(task.snapshot(
            category.name(),
            sub_category.as_ref().map(|sub| sub.name()),
        ))
    }
}
