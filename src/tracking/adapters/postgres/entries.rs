//! `PostgreSQL` time-entry repository.

use super::{anchor_from_row, models::TimeEntryRow, run_blocking, schema::time_entries};
use crate::db::PgPool;
use crate::task::domain::{TaskId, TaskSnapshot};
use crate::taxonomy::domain::Pillar;
use crate::tracking::{
    domain::{Granularity, PeriodAnchor, PersistedTimeEntryData, SubUnit, TimeEntry, TimeEntryKey},
    ports::{TimeEntryRepository, TrackingRepositoryError, TrackingRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

/// `PostgreSQL`-backed time-entry repository.
#[derive(Debug, Clone)]
pub struct PostgresTimeEntryRepository {
    pool: PgPool,
}

impl PostgresTimeEntryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepository {
    async fn list_for_period(
        &self,
        anchor: PeriodAnchor,
        task_id: Option<TaskId>,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>> {
        run_blocking(&self.pool, move |connection| {
            let mut query = time_entries::table
                .filter(time_entries::granularity.eq(anchor.granularity().as_str()))
                .filter(time_entries::anchor_date.eq(anchor.date()))
                .select(TimeEntryRow::as_select())
                .into_boxed();
            if let Some(wanted) = task_id {
                query = query.filter(time_entries::task_id.eq(wanted.into_inner()));
            }
            query
                .order((time_entries::task_id.asc(), time_entries::sub_unit.asc()))
                .load::<TimeEntryRow>(connection)
                .map_err(TrackingRepositoryError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }

    async fn find(&self, key: TimeEntryKey) -> TrackingRepositoryResult<Option<TimeEntry>> {
        let sub_unit = sub_unit_column(key.sub_unit)?;
        run_blocking(&self.pool, move |connection| {
            let row = time_entries::table
                .find((
                    key.task_id.into_inner(),
                    key.anchor.granularity().as_str(),
                    key.anchor.date(),
                    sub_unit,
                ))
                .select(TimeEntryRow::as_select())
                .first::<TimeEntryRow>(connection)
                .optional()
                .map_err(TrackingRepositoryError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<TimeEntry>> {
        run_blocking(&self.pool, move |connection| {
            time_entries::table
                .filter(time_entries::granularity.eq(granularity.as_str()))
                .filter(time_entries::anchor_date.between(from, to))
                .order((
                    time_entries::anchor_date.asc(),
                    time_entries::task_id.asc(),
                    time_entries::sub_unit.asc(),
                ))
                .select(TimeEntryRow::as_select())
                .load::<TimeEntryRow>(connection)
                .map_err(TrackingRepositoryError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }
}

pub(super) fn sub_unit_column(sub_unit: SubUnit) -> TrackingRepositoryResult<i32> {
    i32::try_from(sub_unit.value()).map_err(TrackingRepositoryError::persistence)
}

pub(super) fn to_row(entry: &TimeEntry) -> TrackingRepositoryResult<TimeEntryRow> {
    let snapshot = entry.snapshot();
    Ok(TimeEntryRow {
        task_id: entry.task_id().into_inner(),
        granularity: entry.anchor().granularity().as_str().to_owned(),
        anchor_date: entry.anchor().date(),
        sub_unit: sub_unit_column(entry.sub_unit())?,
        minutes: i32::try_from(entry.minutes()).map_err(TrackingRepositoryError::persistence)?,
        task_name: snapshot.task_name.clone(),
        pillar: snapshot.pillar.as_str().to_owned(),
        category_name: snapshot.category_name.clone(),
        sub_category_name: snapshot.sub_category_name.clone(),
        created_at: entry.created_at(),
        updated_at: entry.updated_at(),
    })
}

fn row_to_entry(row: TimeEntryRow) -> TrackingRepositoryResult<TimeEntry> {
    let anchor = anchor_from_row(&row.granularity, row.anchor_date)?;
    let sub_unit = u32::try_from(row.sub_unit).map_err(TrackingRepositoryError::persistence)?;
    let minutes = u32::try_from(row.minutes).map_err(TrackingRepositoryError::persistence)?;
    let pillar = Pillar::try_from(row.pillar.as_str()).map_err(TrackingRepositoryError::persistence)?;

    Ok(TimeEntry::from_persisted(PersistedTimeEntryData {
        key: TimeEntryKey::new(TaskId::from_uuid(row.task_id), anchor, SubUnit::new(sub_unit)),
        minutes,
        snapshot: TaskSnapshot {
            task_name: row.task_name,
            pillar,
            category_name: row.category_name,
            sub_category_name: row.sub_category_name,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
