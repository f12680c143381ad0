//! Task queries, hard deletes, and migration history against `PostgreSQL`.

use super::helpers::{TestDatabase, category, january, placed_task, test_runtime};
use diesel::prelude::*;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use pillarwise::{
    db,
    task::{
        domain::{Frequency, Task, TaskId, TaskPlacement},
        ports::TaskQuery,
        services::{CreateTaskRequest, TaskRegistryError},
    },
    taxonomy::domain::Pillar,
    tracking::{domain::SubUnit, services::EntryInput},
};
use rstest::rstest;

#[rstest]
fn hard_delete_purges_only_the_deleted_task(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "hard_delete").expect("database setup");
    let services = db.services();
    let stores = db.stores();
    let anchor = january(1);

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        let code = placed_task(&services, Pillar::HardWork, "Code", 60, Frequency::Daily).await;
        services
            .entries
            .bulk_save(
                anchor,
                vec![
                    EntryInput::new(read.id(), SubUnit::new(7), 20),
                    EntryInput::new(read.id(), SubUnit::new(8), 10),
                    EntryInput::new(code.id(), SubUnit::new(9), 60),
                ],
            )
            .await
            .expect("save");
        services
            .statuses
            .mark_na(read.id(), anchor)
            .await
            .expect("mark NA");

        let outcome = services
            .tasks
            .hard_delete(read.id())
            .await
            .expect("hard delete");

        assert_eq!((outcome.entries_removed, outcome.statuses_removed), (2, 1));
        assert!(
            stores
                .tasks
                .find_by_id(read.id())
                .await
                .expect("lookup")
                .is_none()
        );
        let left = stores
            .entries
            .list_for_period(anchor, None)
            .await
            .expect("listing");
        assert_eq!(left.len(), 1);
        assert!(left.iter().all(|entry| entry.task_id() == code.id()));
        assert!(
            stores
                .statuses
                .list_for_period(anchor)
                .await
                .expect("listing")
                .is_empty()
        );
    });
}

#[rstest]
fn hard_delete_of_a_missing_task_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "hard_delete_missing")
        .expect("database setup");
    let services = db.services();
    let ghost = TaskId::new();

    let result = test_runtime().block_on(services.tasks.hard_delete(ghost));

    assert!(matches!(result, Err(TaskRegistryError::NotFound(id)) if id == ghost));
}

#[rstest]
fn deleting_a_task_row_cascades_to_tracking_rows(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "cascade").expect("database setup");
    let services = db.services();
    let stores = db.stores();
    let anchor = january(1);
    let rt = test_runtime();

    let read = rt.block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), SubUnit::new(7), 30)])
            .await
            .expect("save");
        services
            .statuses
            .mark_complete(read.id(), anchor)
            .await
            .expect("complete");
        read
    });

    let mut conn = db.pool.get().expect("connection");
    diesel::sql_query("DELETE FROM tasks WHERE id = $1")
        .bind::<diesel::sql_types::Uuid, _>(read.id().into_inner())
        .execute(&mut conn)
        .expect("raw delete");
    drop(conn);

    rt.block_on(async {
        assert!(
            stores
                .entries
                .list_for_period(anchor, None)
                .await
                .expect("listing")
                .is_empty()
        );
        assert_eq!(
            stores.statuses.find(read.id(), anchor).await.expect("lookup"),
            None
        );
    });
}

fn names(tasks: &[Task]) -> Vec<String> {
    let mut names: Vec<String> = tasks
        .iter()
        .map(|task| task.name().as_str().to_owned())
        .collect();
    names.sort();
    names
}

#[rstest]
fn task_query_filters_combine(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "task_query").expect("database setup");
    let services = db.services();

    test_runtime().block_on(async {
        let reading = category(&services, Pillar::Calmness, "Reading").await;
        let chores = category(&services, Pillar::Family, "Chores").await;
        for (name, placement, frequency) in [
            (
                "Read",
                TaskPlacement::new(Pillar::Calmness, reading.id()),
                Frequency::Daily,
            ),
            (
                "Journal",
                TaskPlacement::new(Pillar::Calmness, reading.id()),
                Frequency::Weekly,
            ),
        ] {
            services
                .tasks
                .create(CreateTaskRequest::new(name, placement, 30, frequency))
                .await
                .expect("task creation should succeed");
        }
        let dishes = services
            .tasks
            .create(CreateTaskRequest::new(
                "Dishes",
                TaskPlacement::new(Pillar::Family, chores.id()),
                15,
                Frequency::Daily,
            ))
            .await
            .expect("task creation should succeed");
        services
            .tasks
            .soft_delete(dishes.id())
            .await
            .expect("soft delete");

        let active = services
            .tasks
            .list(TaskQuery::default())
            .await
            .expect("listing");
        let daily = services
            .tasks
            .list(TaskQuery::active_with_frequency(Frequency::Daily))
            .await
            .expect("listing");
        let everything_daily = services
            .tasks
            .list(TaskQuery {
                include_inactive: true,
                ..TaskQuery::active_with_frequency(Frequency::Daily)
            })
            .await
            .expect("listing");
        let calm = services
            .tasks
            .list(TaskQuery {
                pillar: Some(Pillar::Calmness),
                ..TaskQuery::default()
            })
            .await
            .expect("listing");
        let in_chores = services
            .tasks
            .list(TaskQuery {
                category_id: Some(chores.id()),
                include_inactive: true,
                ..TaskQuery::default()
            })
            .await
            .expect("listing");

        assert_eq!(names(&active), vec!["Journal", "Read"]);
        assert_eq!(names(&daily), vec!["Read"]);
        assert_eq!(names(&everything_daily), vec!["Dishes", "Read"]);
        assert_eq!(names(&calm), vec!["Journal", "Read"]);
        assert_eq!(names(&in_chores), vec!["Dishes"]);
    });
}

#[rstest]
fn template_records_every_migration(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "migrations").expect("database setup");

    let pending = db::run_pending_migrations(&db.pool).expect("migration run");
    let mut history = db::applied_migrations(&db.pool).expect("history");
    history.sort();

    assert!(pending.is_empty());
    assert_eq!(
        history,
        vec!["20240101000001", "20240101000002", "20240101000003"]
    );
}
