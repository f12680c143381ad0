//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Uses `pg-embed-setup-unpriv` for embedded `PostgreSQL` lifecycle
//! management. The schema is migrated once into a template database and
//! every test clones it into a database of its own.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pillarwise::{
    app::{Services, Stores},
    db::{self, MIGRATIONS, PgPool},
    task::{
        domain::{Frequency, Task, TaskPlacement},
        services::CreateTaskRequest,
    },
    taxonomy::{
        domain::{Category, Pillar},
        services::CreateCategoryRequest,
    },
    tracking::domain::{Granularity, PeriodAnchor},
};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Boxed error used by fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "pillarwise_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the test database when the owning test ends, even on panic.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// A migrated database private to one test.
///
/// The pool is declared before the guard so its connection closes before
/// the database is dropped.
pub struct TestDatabase {
    /// Single-connection pool for deterministic behaviour.
    pub pool: PgPool,
    _guard: CleanupGuard,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be created.
    pub fn create(cluster: &'static TestCluster, label: &str) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let db_name = format!("test_{label}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let guard = CleanupGuard { cluster, db_name };
        let pool = db::connect(&cluster.connection().database_url(&guard.db_name), 1)?;
        Ok(Self {
            pool,
            _guard: guard,
        })
    }

    /// Stores backed by this database.
    pub fn stores(&self) -> Stores {
        Stores::postgres(&self.pool)
    }

    /// Application services over [`Self::stores`].
    pub fn services(&self) -> Services<DefaultClock> {
        Services::new(&self.stores(), Arc::new(DefaultClock))
    }
}

/// Creates a category and a task inside it.
pub async fn placed_task(
    services: &Services<DefaultClock>,
    pillar: Pillar,
    name: &str,
    minutes: u64,
    frequency: Frequency,
) -> Task {
    let category = category(services, pillar, &format!("{name} category")).await;
    services
        .tasks
        .create(CreateTaskRequest::new(
            name,
            TaskPlacement::new(pillar, category.id()),
            minutes,
            frequency,
        ))
        .await
        .expect("task creation should succeed")
}

/// Creates a category.
pub async fn category(services: &Services<DefaultClock>, pillar: Pillar, name: &str) -> Category {
    services
        .taxonomy
        .create_category(CreateCategoryRequest::new(pillar, name))
        .await
        .expect("category creation should succeed")
}

/// The daily period of `2024-01-<day>`.
pub fn january(day: u32) -> PeriodAnchor {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, day).expect("valid January date");
    PeriodAnchor::new(Granularity::Daily, date).expect("any date anchors a day")
}
