//! Composition root: store bundles and the services built on them.

use crate::db::PgPool;
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskRegistryService,
};
use crate::taxonomy::{
    adapters::{memory::InMemoryTaxonomyRepository, postgres::PostgresTaxonomyRepository},
    ports::TaxonomyRepository,
    services::TaxonomyService,
};
use crate::tracking::{
    adapters::{
        memory::{
            InMemoryPeriodSummaryRepository, InMemoryTaskStatusRepository,
            InMemoryTimeEntryRepository, InMemoryTrackingUnitOfWork,
        },
        postgres::{
            PostgresPeriodSummaryRepository, PostgresTaskStatusRepository,
            PostgresTimeEntryRepository, PostgresTrackingUnitOfWork,
        },
    },
    ports::{
        PeriodSummaryRepository, TaskStatusRepository, TimeEntryRepository, TrackingUnitOfWork,
    },
    services::{AnalyticsService, ReconciliationService, TaskStatusService, TimeEntryService},
};
use mockable::Clock;
use std::sync::Arc;

/// One handle per repository port.
#[derive(Clone)]
pub struct Stores {
    /// Categories and sub-categories.
    pub taxonomy: Arc<dyn TaxonomyRepository>,
    /// Task definitions.
    pub tasks: Arc<dyn TaskRepository>,
    /// Logged minutes.
    pub entries: Arc<dyn TimeEntryRepository>,
    /// Per-period overrides.
    pub statuses: Arc<dyn TaskStatusRepository>,
    /// Cached summaries.
    pub summaries: Arc<dyn PeriodSummaryRepository>,
    /// Atomic writes across tasks, entries, statuses, and summaries.
    pub unit_of_work: Arc<dyn TrackingUnitOfWork>,
}

impl Stores {
    /// Creates empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        let tasks = InMemoryTaskRepository::new();
        let entries = InMemoryTimeEntryRepository::new();
        let statuses = InMemoryTaskStatusRepository::new();
        let summaries = InMemoryPeriodSummaryRepository::new();
        let unit_of_work = InMemoryTrackingUnitOfWork::new(
            tasks.clone(),
            entries.clone(),
            statuses.clone(),
            summaries.clone(),
        );
        Self {
            taxonomy: Arc::new(InMemoryTaxonomyRepository::new()),
            tasks: Arc::new(tasks),
            entries: Arc::new(entries),
            statuses: Arc::new(statuses),
            summaries: Arc::new(summaries),
            unit_of_work: Arc::new(unit_of_work),
        }
    }

    /// Creates `PostgreSQL` stores sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            taxonomy: Arc::new(PostgresTaxonomyRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            entries: Arc::new(PostgresTimeEntryRepository::new(pool.clone())),
            statuses: Arc::new(PostgresTaskStatusRepository::new(pool.clone())),
            summaries: Arc::new(PostgresPeriodSummaryRepository::new(pool.clone())),
            unit_of_work: Arc::new(PostgresTrackingUnitOfWork::new(pool.clone())),
        }
    }
}

/// Every application service wired to the same stores and clock.
pub struct Services<C>
where
    C: Clock + Send + Sync,
{
    /// Pillars, categories, and sub-categories.
    pub taxonomy: TaxonomyService<C>,
    /// Task definitions and lifecycle.
    pub tasks: TaskRegistryService<C>,
    /// Period reconciliation and the summary cache.
    pub reconciler: Arc<ReconciliationService<C>>,
    /// Time-entry logging.
    pub entries: TimeEntryService<C>,
    /// Per-period status transitions.
    pub statuses: TaskStatusService<C>,
    /// Read-only aggregates.
    pub analytics: AnalyticsService,
}

impl<C> Services<C>
where
    C: Clock + Send + Sync,
{
    /// Builds every service over the given stores.
    #[must_use]
    pub fn new(stores: &Stores, clock: Arc<C>) -> Self {
        let reconciler = Arc::new(ReconciliationService::new(
            Arc::clone(&stores.tasks),
            Arc::clone(&stores.entries),
            Arc::clone(&stores.statuses),
            Arc::clone(&stores.summaries),
            Arc::clone(&stores.unit_of_work),
            Arc::clone(&clock),
        ));
        Self {
            taxonomy: TaxonomyService::new(Arc::clone(&stores.taxonomy), Arc::clone(&clock)),
            tasks: TaskRegistryService::new(
                Arc::clone(&stores.taxonomy),
                Arc::clone(&stores.tasks),
                Arc::clone(&stores.unit_of_work),
                Arc::clone(&clock),
            ),
            entries: TimeEntryService::new(
                Arc::clone(&stores.taxonomy),
                Arc::clone(&stores.tasks),
                Arc::clone(&stores.entries),
                Arc::clone(&reconciler),
                Arc::clone(&clock),
            ),
            statuses: TaskStatusService::new(
                Arc::clone(&stores.tasks),
                Arc::clone(&stores.statuses),
                Arc::clone(&reconciler),
                clock,
            ),
            analytics: AnalyticsService::new(
                Arc::clone(&stores.entries),
                Arc::clone(&stores.summaries),
            ),
            reconciler,
        }
    }
}
