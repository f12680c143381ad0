//! Pure period allocation reconciliation.

use super::{PeriodAnchor, PeriodSummary, TaskPeriodStatus, TimeEntry};
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Derives the summary of one period from its inputs.
///
/// A task contributes its full allocation when it recurs at the period's
/// granularity, is active, carries no global completion or NA stamp dated on
/// or before the anchor date, and has no completed or NA status for the
/// period. Spent minutes sum every entry of the period regardless of status.
/// Tasks and entries belonging to other periods are ignored, so callers may
/// pass supersets.
#[must_use]
pub fn reconcile(
    anchor: PeriodAnchor,
    tasks: &[Task],
    entries: &[TimeEntry],
    statuses: &[TaskPeriodStatus],
    computed_at: DateTime<Utc>,
) -> PeriodSummary {
    let overrides: HashMap<TaskId, &TaskPeriodStatus> = statuses
        .iter()
        .filter(|status| status.anchor() == anchor)
        .map(|status| (status.task_id(), status))
        .collect();
    let wanted = anchor.granularity().frequency();

    let total_allocated = tasks
        .iter()
        .filter(|task| task.frequency() == wanted && task.is_active())
        .filter(|task| !task.is_globally_excluded_on(anchor.date()))
        .filter(|task| {
            overrides
                .get(&task.id())
                .is_none_or(|status| !status.state().excludes_allocation())
        })
        .map(|task| u64::from(task.allocated_minutes().value()))
        .sum();

    let total_spent = entries
        .iter()
        .filter(|entry| entry.anchor() == anchor)
        .map(|entry| u64::from(entry.minutes()))
        .sum();

    PeriodSummary::new(anchor, total_allocated, total_spent, computed_at)
}
