//! Diesel row models for tracking persistence.

use super::schema::{period_summaries, task_period_statuses, time_entries};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result and insert row for time entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = time_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimeEntryRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Granularity storage value.
    pub granularity: String,
    /// Anchor date.
    pub anchor_date: NaiveDate,
    /// Sub-unit index.
    pub sub_unit: i32,
    /// Logged minutes.
    pub minutes: i32,
    /// Snapshot task name.
    pub task_name: String,
    /// Snapshot pillar storage value.
    pub pillar: String,
    /// Snapshot category name.
    pub category_name: String,
    /// Snapshot sub-category name.
    pub sub_category_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for period statuses.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_period_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskPeriodStatusRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Granularity storage value.
    pub granularity: String,
    /// Anchor date.
    pub anchor_date: NaiveDate,
    /// State tag.
    pub state: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for cached summaries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = period_summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PeriodSummaryRow {
    /// Granularity storage value.
    pub granularity: String,
    /// Anchor date.
    pub anchor_date: NaiveDate,
    /// Allocated minutes.
    pub total_allocated: i64,
    /// Spent minutes.
    pub total_spent: i64,
    /// Completeness flag.
    pub is_complete: bool,
    /// Derivation timestamp.
    pub computed_at: DateTime<Utc>,
}
