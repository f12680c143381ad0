//! `PostgreSQL` period task-status repository.

use super::{
    CorruptRow, anchor_from_row, models::TaskPeriodStatusRow, run_blocking,
    schema::task_period_statuses,
};
use crate::db::PgPool;
use crate::task::domain::TaskId;
use crate::tracking::{
    domain::{PeriodAnchor, PeriodTaskState, TaskPeriodStatus},
    ports::{TaskStatusRepository, TrackingRepositoryError, TrackingRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed period task-status repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskStatusRepository {
    pool: PgPool,
}

impl PostgresTaskStatusRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStatusRepository for PostgresTaskStatusRepository {
    async fn find(
        &self,
        task_id: TaskId,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Option<TaskPeriodStatus>> {
        run_blocking(&self.pool, move |connection| {
            let row = task_period_statuses::table
                .find((
                    task_id.into_inner(),
                    anchor.granularity().as_str(),
                    anchor.date(),
                ))
                .select(TaskPeriodStatusRow::as_select())
                .first::<TaskPeriodStatusRow>(connection)
                .optional()
                .map_err(TrackingRepositoryError::persistence)?;
            row.map(row_to_status).transpose()
        })
        .await
    }

    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
    ) -> TrackingRepositoryResult<Vec<TaskPeriodStatus>> {
        run_blocking(&self.pool, move |connection| {
            task_period_statuses::table
                .filter(task_period_statuses::granularity.eq(anchor.granularity().as_str()))
                .filter(task_period_statuses::anchor_date.eq(anchor.date()))
                .order(task_period_statuses::task_id.asc())
                .select(TaskPeriodStatusRow::as_select())
                .load::<TaskPeriodStatusRow>(connection)
                .map_err(TrackingRepositoryError::persistence)?
                .into_iter()
                .map(row_to_status)
                .collect()
        })
        .await
    }
}

pub(super) fn to_row(status: &TaskPeriodStatus) -> TaskPeriodStatusRow {
    TaskPeriodStatusRow {
        task_id: status.task_id().into_inner(),
        granularity: status.anchor().granularity().as_str().to_owned(),
        anchor_date: status.anchor().date(),
        state: status.state().as_str().to_owned(),
        completed_at: status.state().completed_at(),
        updated_at: status.updated_at(),
    }
}

fn row_to_status(row: TaskPeriodStatusRow) -> TrackingRepositoryResult<TaskPeriodStatus> {
    let anchor = anchor_from_row(&row.granularity, row.anchor_date)?;
    let state = match (row.state.as_str(), row.completed_at) {
        ("tracked", _) => PeriodTaskState::Tracked,
        ("completed", Some(completed_at)) => PeriodTaskState::Completed { completed_at },
        ("not_applicable", _) => PeriodTaskState::NotApplicable,
        (other, _) => {
            return Err(TrackingRepositoryError::persistence(CorruptRow(format!(
                "status '{other}' for task {}",
                row.task_id
            ))));
        }
    };
    Ok(TaskPeriodStatus::from_persisted(
        TaskId::from_uuid(row.task_id),
        anchor,
        state,
        row.updated_at,
    ))
}
