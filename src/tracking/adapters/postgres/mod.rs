//! `PostgreSQL` adapters for tracking persistence.

mod entries;
mod models;
mod schema;
mod statuses;
mod summaries;
mod unit_of_work;

pub use entries::PostgresTimeEntryRepository;
pub use statuses::PostgresTaskStatusRepository;
pub use summaries::PostgresPeriodSummaryRepository;
pub use unit_of_work::PostgresTrackingUnitOfWork;

use crate::db::PgPool;
use crate::tracking::ports::{TrackingRepositoryError, TrackingRepositoryResult};
use diesel::pg::PgConnection;
use thiserror::Error;

/// A stored row that no longer satisfies the domain rules.
#[derive(Debug, Error)]
#[error("corrupt tracking row: {0}")]
struct CorruptRow(String);

async fn run_blocking<F, T>(pool: &PgPool, f: F) -> TrackingRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> TrackingRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TrackingRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(TrackingRepositoryError::persistence)?
}

fn anchor_from_row(
    granularity: &str,
    anchor_date: chrono::NaiveDate,
) -> TrackingRepositoryResult<crate::tracking::domain::PeriodAnchor> {
    use crate::tracking::domain::{Granularity, PeriodAnchor};

    let parsed = Granularity::try_from(granularity).map_err(TrackingRepositoryError::persistence)?;
    PeriodAnchor::new(parsed, anchor_date).map_err(TrackingRepositoryError::persistence)
}
