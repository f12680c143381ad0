//! `PostgreSQL` transactional writes for period tracking.

use super::{
    entries,
    models::{PeriodSummaryRow, TaskPeriodStatusRow, TimeEntryRow},
    run_blocking,
    schema::{period_summaries, task_period_statuses, time_entries},
    statuses, summaries,
};
use crate::db::PgPool;
use crate::task::{adapters::postgres::schema::tasks, domain::TaskId};
use crate::tracking::{
    domain::{PeriodChanges, PeriodSummary, TimeEntryKey},
    ports::{PurgedTask, TrackingRepositoryError, TrackingRepositoryResult, TrackingUnitOfWork},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use thiserror::Error;

/// Failure inside a write transaction; either variant rolls it back.
#[derive(Debug, Error)]
enum WriteError {
    #[error(transparent)]
    Diesel(#[from] DieselError),
    #[error(transparent)]
    Rejected(#[from] TrackingRepositoryError),
}

impl From<WriteError> for TrackingRepositoryError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Diesel(source) => Self::persistence(source),
            WriteError::Rejected(rejected) => rejected,
        }
    }
}

/// Rows of one period batch, converted before the transaction opens.
struct PeriodRows {
    granularity: String,
    anchor_date: NaiveDate,
    removed_entries: Vec<(uuid::Uuid, i32)>,
    saved_entries: Vec<TimeEntryRow>,
    removed_statuses: Vec<uuid::Uuid>,
    saved_statuses: Vec<TaskPeriodStatusRow>,
    summary: PeriodSummaryRow,
}

impl PeriodRows {
    fn new(changes: &PeriodChanges, summary: &PeriodSummary) -> TrackingRepositoryResult<Self> {
        let anchor = changes.anchor();
        Ok(Self {
            granularity: anchor.granularity().as_str().to_owned(),
            anchor_date: anchor.date(),
            removed_entries: changes
                .removed_entries()
                .iter()
                .map(entry_key_columns)
                .collect::<TrackingRepositoryResult<_>>()?,
            saved_entries: changes
                .saved_entries()
                .iter()
                .map(entries::to_row)
                .collect::<TrackingRepositoryResult<_>>()?,
            removed_statuses: changes
                .removed_statuses()
                .iter()
                .copied()
                .map(TaskId::into_inner)
                .collect(),
            saved_statuses: changes.saved_statuses().iter().map(statuses::to_row).collect(),
            summary: summaries::to_row(summary)?,
        })
    }
}

/// `PostgreSQL`-backed unit of work; each call runs in one transaction.
#[derive(Debug, Clone)]
pub struct PostgresTrackingUnitOfWork {
    pool: PgPool,
}

impl PostgresTrackingUnitOfWork {
    /// Creates a unit of work from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackingUnitOfWork for PostgresTrackingUnitOfWork {
    async fn commit_period(
        &self,
        changes: &PeriodChanges,
        summary: &PeriodSummary,
    ) -> TrackingRepositoryResult<()> {
        let rows = PeriodRows::new(changes, summary)?;
        run_blocking(&self.pool, move |connection| {
            connection
                .transaction::<_, WriteError, _>(|tx| write_period(tx, &rows))
                .map_err(TrackingRepositoryError::from)
        })
        .await
    }

    async fn purge_task(&self, task_id: TaskId) -> TrackingRepositoryResult<Option<PurgedTask>> {
        let id = task_id.into_inner();
        run_blocking(&self.pool, move |connection| {
            connection
                .transaction::<_, WriteError, _>(|tx| {
                    let entries_removed =
                        diesel::delete(time_entries::table.filter(time_entries::task_id.eq(id)))
                            .execute(tx)?;
                    let statuses_removed = diesel::delete(
                        task_period_statuses::table.filter(task_period_statuses::task_id.eq(id)),
                    )
                    .execute(tx)?;
                    if diesel::delete(tasks::table.find(id)).execute(tx)? == 0 {
                        return Ok(None);
                    }
                    Ok(Some(PurgedTask {
                        entries_removed: row_count(entries_removed)?,
                        statuses_removed: row_count(statuses_removed)?,
                    }))
                })
                .map_err(TrackingRepositoryError::from)
        })
        .await
    }
}

fn entry_key_columns(key: &TimeEntryKey) -> TrackingRepositoryResult<(uuid::Uuid, i32)> {
    Ok((key.task_id.into_inner(), entries::sub_unit_column(key.sub_unit)?))
}

fn write_period(tx: &mut PgConnection, rows: &PeriodRows) -> Result<(), WriteError> {
    for (task_id, sub_unit) in &rows.removed_entries {
        diesel::delete(time_entries::table.find((
            *task_id,
            rows.granularity.as_str(),
            rows.anchor_date,
            *sub_unit,
        )))
        .execute(tx)?;
    }
    for row in &rows.saved_entries {
        diesel::insert_into(time_entries::table)
            .values(row)
            .on_conflict((
                time_entries::task_id,
                time_entries::granularity,
                time_entries::anchor_date,
                time_entries::sub_unit,
            ))
            .do_update()
            .set((
                time_entries::minutes.eq(excluded(time_entries::minutes)),
                time_entries::updated_at.eq(excluded(time_entries::updated_at)),
            ))
            .execute(tx)
            .map_err(|err| unknown_task(err, row.task_id))?;
    }
    for task_id in &rows.removed_statuses {
        diesel::delete(task_period_statuses::table.find((
            *task_id,
            rows.granularity.as_str(),
            rows.anchor_date,
        )))
        .execute(tx)?;
    }
    for row in &rows.saved_statuses {
        diesel::insert_into(task_period_statuses::table)
            .values(row)
            .on_conflict((
                task_period_statuses::task_id,
                task_period_statuses::granularity,
                task_period_statuses::anchor_date,
            ))
            .do_update()
            .set((
                task_period_statuses::state.eq(excluded(task_period_statuses::state)),
                task_period_statuses::completed_at.eq(excluded(task_period_statuses::completed_at)),
                task_period_statuses::updated_at.eq(excluded(task_period_statuses::updated_at)),
            ))
            .execute(tx)
            .map_err(|err| unknown_task(err, row.task_id))?;
    }
    diesel::insert_into(period_summaries::table)
        .values(&rows.summary)
        .on_conflict((period_summaries::granularity, period_summaries::anchor_date))
        .do_update()
        .set((
            period_summaries::total_allocated.eq(excluded(period_summaries::total_allocated)),
            period_summaries::total_spent.eq(excluded(period_summaries::total_spent)),
            period_summaries::is_complete.eq(excluded(period_summaries::is_complete)),
            period_summaries::computed_at.eq(excluded(period_summaries::computed_at)),
        ))
        .execute(tx)?;
    Ok(())
}

fn unknown_task(err: DieselError, task_id: uuid::Uuid) -> WriteError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            WriteError::Rejected(TrackingRepositoryError::UnknownTask(TaskId::from_uuid(task_id)))
        }
        other => WriteError::Diesel(other),
    }
}

fn row_count(rows: usize) -> Result<u64, WriteError> {
    u64::try_from(rows).map_err(|err| TrackingRepositoryError::persistence(err).into())
}
