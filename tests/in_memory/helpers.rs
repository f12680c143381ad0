//! Shared fixtures for in-memory service integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use pillarwise::{
    app::{Services, Stores},
    task::{
        domain::{Frequency, Task, TaskPlacement},
        services::CreateTaskRequest,
    },
    taxonomy::{domain::Pillar, services::CreateCategoryRequest},
    tracking::domain::{Granularity, PeriodAnchor},
};
use rstest::fixture;

/// Services type used by the integration tests.
pub type TestServices = Services<DefaultClock>;

/// Provides services over fresh in-memory stores.
#[fixture]
pub fn services() -> TestServices {
    Services::new(&Stores::in_memory(), Arc::new(DefaultClock))
}

/// Creates a category and a task placed directly under it.
pub async fn task(
    services: &TestServices,
    pillar: Pillar,
    name: &str,
    minutes: u64,
    frequency: Frequency,
) -> Task {
    let category = services
        .taxonomy
        .create_category(CreateCategoryRequest::new(pillar, format!("{name} category")))
        .await
        .expect("category creation should succeed");
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

/// Builds a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builds a canonical anchor.
pub fn anchor(granularity: Granularity, year: i32, month: u32, day: u32) -> PeriodAnchor {
    PeriodAnchor::new(granularity, date(year, month, day)).expect("canonical anchor")
}
