//! Taxonomy placement and task lifecycle through the public services.

use super::helpers::{TestServices, anchor, services, task};
use pillarwise::{
    task::{
        domain::{Frequency, TaskPlacement},
        ports::TaskQuery,
        services::{CreateTaskRequest, TaskRegistryError, UpdateTaskRequest},
    },
    taxonomy::{
        domain::Pillar,
        ports::TaxonomyRepositoryError,
        services::{CreateCategoryRequest, TaxonomyServiceError},
    },
    tracking::{
        domain::{Granularity, SubUnit},
        services::{EntryInput, TrackingServiceError},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn category_names_are_unique_per_pillar_ignoring_case(services: TestServices) {
    services
        .taxonomy
        .create_category(CreateCategoryRequest::new(Pillar::Family, "Dinners"))
        .await
        .expect("first category should succeed");

    let duplicate = services
        .taxonomy
        .create_category(CreateCategoryRequest::new(Pillar::Family, "dinners"))
        .await;
    assert!(matches!(
        duplicate,
        Err(TaxonomyServiceError::Repository(
            TaxonomyRepositoryError::DuplicateCategoryName { .. }
        ))
    ));

    services
        .taxonomy
        .create_category(CreateCategoryRequest::new(Pillar::Calmness, "Dinners"))
        .await
        .expect("same name under another pillar should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_placement_must_match_category_pillar(services: TestServices) {
    let category = services
        .taxonomy
        .create_category(CreateCategoryRequest::new(Pillar::HardWork, "Writing"))
        .await
        .expect("category creation should succeed");

    let result = services
        .tasks
        .create(CreateTaskRequest::new(
            "Journal",
            TaskPlacement::new(Pillar::Calmness, category.id()),
            20,
            Frequency::Daily,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskRegistryError::CategoryPillarMismatch { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_frequency_and_hides_retired_tasks(services: TestServices) {
    let read = task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
    task(&services, Pillar::Family, "Call parents", 60, Frequency::Weekly).await;
    services
        .tasks
        .soft_delete(read.id())
        .await
        .expect("soft delete should succeed");

    let daily = services
        .tasks
        .list(TaskQuery::active_with_frequency(Frequency::Daily))
        .await
        .expect("listing should succeed");
    assert!(daily.is_empty());

    let everything = services
        .tasks
        .list(TaskQuery {
            include_inactive: true,
            ..TaskQuery::default()
        })
        .await
        .expect("listing should succeed");
    assert_eq!(everything.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retired_tasks_reject_new_minutes(services: TestServices) {
    let read = task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
    services
        .tasks
        .soft_delete(read.id())
        .await
        .expect("soft delete should succeed");

    let result = services
        .entries
        .bulk_save(
            anchor(Granularity::Daily, 2024, 1, 1),
            vec![EntryInput::new(read.id(), SubUnit::new(9), 15)],
        )
        .await;

    assert!(matches!(result, Err(TrackingServiceError::TaskRetired(id)) if id == read.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hard_delete_removes_entries_and_statuses(services: TestServices) {
    let read = task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
    let day = anchor(Granularity::Daily, 2024, 1, 1);
    services
        .entries
        .bulk_save(day, vec![EntryInput::new(read.id(), SubUnit::new(7), 30)])
        .await
        .expect("bulk save should succeed");
    services
        .statuses
        .mark_complete(read.id(), day)
        .await
        .expect("status change should succeed");

    let outcome = services
        .tasks
        .hard_delete(read.id())
        .await
        .expect("hard delete should succeed");

    assert_eq!((outcome.entries_removed, outcome.statuses_removed), (1, 1));
    let remaining = services
        .entries
        .entries(day, None)
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
    assert!(
        services
            .tasks
            .find(read.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocation_changes_apply_on_next_reconcile(services: TestServices) {
    let read = task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
    let day = anchor(Granularity::Daily, 2024, 1, 1);
    services
        .entries
        .bulk_save(day, vec![EntryInput::new(read.id(), SubUnit::new(7), 45)])
        .await
        .expect("bulk save should succeed");

    services
        .tasks
        .update(read.id(), UpdateTaskRequest::new().with_allocated_minutes(45))
        .await
        .expect("update should succeed");

    let summary = services
        .reconciler
        .reconcile(day)
        .await
        .expect("reconcile should succeed");
    assert_eq!((summary.total_allocated, summary.total_spent), (45, 45));
    assert!(summary.is_complete);
}
