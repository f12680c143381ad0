//! `PostgreSQL` connection pooling and schema migrations.
//!
//! Schema changes live in `migrations/` as numbered, ordered directories.
//! They are embedded at compile time and applied through Diesel's migration
//! harness, which records every applied version in its history table so a
//! re-run only applies what is pending.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by all repository adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations embedded from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseSetupError {
    /// The connection pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A migration failed; the harness rolls back the failing script.
    #[error("migration failed: {0}")]
    Migration(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`DatabaseSetupError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, DatabaseSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Applies every pending migration and returns the versions applied.
///
/// # Errors
///
/// Returns [`DatabaseSetupError`] when a connection cannot be obtained or a
/// migration script fails.
pub fn run_pending_migrations(pool: &PgPool) -> Result<Vec<String>, DatabaseSetupError> {
    let mut connection = pool.get()?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(DatabaseSetupError::Migration)?;
    Ok(applied.iter().map(ToString::to_string).collect())
}

/// Returns the migration versions already recorded in the history table.
///
/// # Errors
///
/// Returns [`DatabaseSetupError`] when a connection cannot be obtained or the
/// history table cannot be read.
pub fn applied_migrations(pool: &PgPool) -> Result<Vec<String>, DatabaseSetupError> {
    let mut connection = pool.get()?;
    let applied = connection
        .applied_migrations()
        .map_err(DatabaseSetupError::Migration)?;
    Ok(applied.iter().map(ToString::to_string).collect())
}
