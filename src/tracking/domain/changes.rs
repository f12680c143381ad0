//! Writes staged against one period before they are committed.

use super::{PeriodAnchor, TaskPeriodStatus, TimeEntry, TimeEntryKey};
use crate::task::domain::TaskId;
use std::collections::BTreeMap;

/// Entry and status writes for one period, committed together with the
/// period's summary.
///
/// Removals apply before saves, so a key that is both removed and saved ends
/// up stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodChanges {
    anchor: PeriodAnchor,
    saved_entries: Vec<TimeEntry>,
    removed_entries: Vec<TimeEntryKey>,
    saved_statuses: Vec<TaskPeriodStatus>,
    removed_statuses: Vec<TaskId>,
}

impl PeriodChanges {
    /// Starts an empty change set for a period.
    #[must_use]
    pub const fn new(anchor: PeriodAnchor) -> Self {
        Self {
            anchor,
            saved_entries: Vec::new(),
            removed_entries: Vec::new(),
            saved_statuses: Vec::new(),
            removed_statuses: Vec::new(),
        }
    }

    /// Returns the period the changes apply to.
    #[must_use]
    pub const fn anchor(&self) -> PeriodAnchor {
        self.anchor
    }

    /// Stages an entry insert or update.
    pub fn save_entry(&mut self, entry: TimeEntry) {
        self.saved_entries.push(entry);
    }

    /// Stages an entry removal.
    pub fn remove_entry(&mut self, key: TimeEntryKey) {
        self.removed_entries.push(key);
    }

    /// Stages a status insert or update.
    pub fn save_status(&mut self, status: TaskPeriodStatus) {
        self.saved_statuses.push(status);
    }

    /// Stages removal of a task's status for the period.
    pub fn remove_status(&mut self, task_id: TaskId) {
        self.removed_statuses.push(task_id);
    }

    /// Entries to insert or update.
    #[must_use]
    pub fn saved_entries(&self) -> &[TimeEntry] {
        &self.saved_entries
    }

    /// Entry keys to remove.
    #[must_use]
    pub fn removed_entries(&self) -> &[TimeEntryKey] {
        &self.removed_entries
    }

    /// Statuses to insert or update.
    #[must_use]
    pub fn saved_statuses(&self) -> &[TaskPeriodStatus] {
        &self.saved_statuses
    }

    /// Tasks whose status for the period is removed.
    #[must_use]
    pub fn removed_statuses(&self) -> &[TaskId] {
        &self.removed_statuses
    }

    /// Returns whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved_entries.is_empty()
            && self.removed_entries.is_empty()
            && self.saved_statuses.is_empty()
            && self.removed_statuses.is_empty()
    }

    /// Projects the stored entries of the period through the staged writes.
    #[must_use]
    pub fn entries_after(&self, stored: Vec<TimeEntry>) -> Vec<TimeEntry> {
        let mut by_key: BTreeMap<TimeEntryKey, TimeEntry> = stored
            .into_iter()
            .map(|entry| (entry.key(), entry))
            .collect();
        for key in &self.removed_entries {
            by_key.remove(key);
        }
        for entry in &self.saved_entries {
            by_key.insert(entry.key(), entry.clone());
        }
        by_key.into_values().collect()
    }

    /// Projects the stored statuses of the period through the staged writes.
    #[must_use]
    pub fn statuses_after(&self, stored: Vec<TaskPeriodStatus>) -> Vec<TaskPeriodStatus> {
        let mut by_task: BTreeMap<TaskId, TaskPeriodStatus> = stored
            .into_iter()
            .map(|status| (status.task_id(), status))
            .collect();
        for task_id in &self.removed_statuses {
            by_task.remove(task_id);
        }
        for status in &self.saved_statuses {
            by_task.insert(status.task_id(), status.clone());
        }
        by_task.into_values().collect()
    }
}
