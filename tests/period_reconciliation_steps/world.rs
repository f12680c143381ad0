//! Shared world state for period reconciliation BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use pillarwise::{
    app::{Services, Stores},
    task::domain::Task,
    tracking::{
        domain::{Granularity, PeriodSummary},
        services::TrackingServiceError,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for period reconciliation behaviour tests.
pub struct PeriodWorld {
    pub services: Services<DefaultClock>,
    pub tasks: HashMap<String, Task>,
    pub last_summary: Option<PeriodSummary>,
    pub last_error: Option<TrackingServiceError>,
}

impl PeriodWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: Services::new(&Stores::in_memory(), Arc::new(DefaultClock)),
            tasks: HashMap::new(),
            last_summary: None,
            last_error: None,
        }
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task(&self, name: &str) -> Result<&Task, eyre::Report> {
        self.tasks
            .get(name)
            .ok_or_else(|| eyre::eyre!("no task named {name} in scenario world"))
    }
}

impl Default for PeriodWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PeriodWorld {
    PeriodWorld::default()
}

/// Parses a granularity named in a step.
pub fn granularity(value: &str) -> Result<Granularity, eyre::Report> {
    Granularity::try_from(value).map_err(|err| eyre::eyre!("invalid granularity in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
