//! `PostgreSQL` summary cache.

use super::{anchor_from_row, models::PeriodSummaryRow, run_blocking, schema::period_summaries};
use crate::db::PgPool;
use crate::tracking::{
    domain::{Granularity, PeriodAnchor, PeriodSummary},
    ports::{PeriodSummaryRepository, TrackingRepositoryError, TrackingRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

/// `PostgreSQL`-backed summary cache.
#[derive(Debug, Clone)]
pub struct PostgresPeriodSummaryRepository {
    pool: PgPool,
}

impl PostgresPeriodSummaryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodSummaryRepository for PostgresPeriodSummaryRepository {
    async fn find(&self, anchor: PeriodAnchor) -> TrackingRepositoryResult<Option<PeriodSummary>> {
        run_blocking(&self.pool, move |connection| {
            let row = period_summaries::table
                .find((anchor.granularity().as_str(), anchor.date()))
                .select(PeriodSummaryRow::as_select())
                .first::<PeriodSummaryRow>(connection)
                .optional()
                .map_err(TrackingRepositoryError::persistence)?;
            row.map(row_to_summary).transpose()
        })
        .await
    }

    async fn list_range(
        &self,
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrackingRepositoryResult<Vec<PeriodSummary>> {
        run_blocking(&self.pool, move |connection| {
            period_summaries::table
                .filter(period_summaries::granularity.eq(granularity.as_str()))
                .filter(period_summaries::anchor_date.between(from, to))
                .order(period_summaries::anchor_date.asc())
                .select(PeriodSummaryRow::as_select())
                .load::<PeriodSummaryRow>(connection)
                .map_err(TrackingRepositoryError::persistence)?
                .into_iter()
                .map(row_to_summary)
                .collect()
        })
        .await
    }
}

pub(super) fn to_row(summary: &PeriodSummary) -> TrackingRepositoryResult<PeriodSummaryRow> {
    Ok(PeriodSummaryRow {
        granularity: summary.anchor.granularity().as_str().to_owned(),
        anchor_date: summary.anchor.date(),
        total_allocated: i64::try_from(summary.total_allocated)
            .map_err(TrackingRepositoryError::persistence)?,
        total_spent: i64::try_from(summary.total_spent)
            .map_err(TrackingRepositoryError::persistence)?,
        is_complete: summary.is_complete,
        computed_at: summary.computed_at,
    })
}

fn row_to_summary(row: PeriodSummaryRow) -> TrackingRepositoryResult<PeriodSummary> {
    let anchor = anchor_from_row(&row.granularity, row.anchor_date)?;
    Ok(PeriodSummary {
        anchor,
        total_allocated: u64::try_from(row.total_allocated)
            .map_err(TrackingRepositoryError::persistence)?,
        total_spent: u64::try_from(row.total_spent).map_err(TrackingRepositoryError::persistence)?,
        is_complete: row.is_complete,
        computed_at: row.computed_at,
    })
}
