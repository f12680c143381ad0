//! Entry, status, and summary writes against `PostgreSQL`.

use super::helpers::{TestDatabase, january, placed_task, test_runtime};
use mockable::{Clock, DefaultClock};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use pillarwise::{
    task::{
        domain::{Frequency, TaskId, TaskSnapshot},
        services::UpdateTaskRequest,
    },
    taxonomy::domain::Pillar,
    tracking::{
        domain::{
            Granularity, PeriodAnchor, PeriodChanges, PeriodSummary, SubUnit, TaskPeriodStatus,
            TimeEntry, TimeEntryKey,
        },
        ports::TrackingRepositoryError,
        services::EntryInput,
    },
};
use rstest::rstest;

fn snapshot(name: &str) -> TaskSnapshot {
    TaskSnapshot {
        task_name: name.to_owned(),
        pillar: Pillar::Calmness,
        category_name: "Reading".to_owned(),
        sub_category_name: None,
    }
}

#[rstest]
fn updating_an_entry_keeps_snapshot_and_creation_time(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "entry_update").expect("database setup");
    let services = db.services();
    let anchor = january(1);
    let slot = SubUnit::new(7);

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), slot, 10)])
            .await
            .expect("first save");
        let before = services
            .entries
            .entries(anchor, Some(read.id()))
            .await
            .expect("listing");
        services
            .tasks
            .update(read.id(), UpdateTaskRequest::new().with_name("Read poetry"))
            .await
            .expect("rename");

        let outcome = services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), slot, 25)])
            .await
            .expect("second save");

        let after = services
            .entries
            .entries(anchor, Some(read.id()))
            .await
            .expect("listing");
        let ([first], [stored]) = (before.as_slice(), after.as_slice()) else {
            panic!("expected one entry before and after, got {before:?} and {after:?}");
        };
        assert_eq!(stored.minutes(), 25);
        assert_eq!(stored.snapshot().task_name(), "Read");
        assert_eq!(stored.created_at(), first.created_at());
        assert!(stored.updated_at() >= first.updated_at());
        assert_eq!(outcome.summary.total_spent, 25);
    });
}

#[rstest]
fn zero_minutes_delete_the_stored_row(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "zero_delete").expect("database setup");
    let services = db.services();
    let anchor = january(1);
    let slot = SubUnit::new(7);

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), slot, 30)])
            .await
            .expect("save");

        let removed = services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), slot, 0)])
            .await
            .expect("zero save");
        let repeated = services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), slot, 0)])
            .await
            .expect("repeated zero save");

        assert_eq!((removed.saved, removed.deleted), (0, 1));
        assert_eq!((repeated.saved, repeated.deleted), (0, 0));
        assert!(
            services
                .entries
                .entries(anchor, None)
                .await
                .expect("listing")
                .is_empty()
        );
        let cached = services
            .reconciler
            .cached(anchor)
            .await
            .expect("cache read")
            .expect("summary cached");
        assert_eq!((cached.total_allocated, cached.total_spent), (30, 0));
    });
}

#[rstest]
fn statuses_round_trip_through_every_state(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "status_states").expect("database setup");
    let services = db.services();
    let stores = db.stores();
    let anchor = january(1);

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;

        let na = services
            .statuses
            .mark_na(read.id(), anchor)
            .await
            .expect("mark NA");
        let stored_na = stores
            .statuses
            .find(read.id(), anchor)
            .await
            .expect("lookup")
            .expect("status stored");
        assert!(stored_na.is_na());
        assert_eq!(na.summary.total_allocated, 0);

        services
            .statuses
            .mark_complete(read.id(), anchor)
            .await
            .expect("complete");
        let stored_done = stores
            .statuses
            .find(read.id(), anchor)
            .await
            .expect("lookup")
            .expect("status stored");
        assert!(stored_done.is_completed());
        assert!(stored_done.state().completed_at().is_some());

        let tracked = services
            .statuses
            .track(read.id(), anchor)
            .await
            .expect("track");
        assert!(tracked.status.is_some_and(|status| status.is_completed()));

        let reset = services
            .statuses
            .reset(read.id(), anchor)
            .await
            .expect("reset");
        assert_eq!(reset.status, None);
        assert_eq!(reset.summary.total_allocated, 30);
        assert_eq!(
            stores.statuses.find(read.id(), anchor).await.expect("lookup"),
            None
        );
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
fn summary_upsert_keeps_one_row_per_period(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "summary_upsert").expect("database setup");
    let services = db.services();
    let anchor = january(1);

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        let first = services.reconciler.reconcile(anchor).await.expect("reconcile");
        let logged = services
            .entries
            .bulk_save(anchor, vec![EntryInput::new(read.id(), SubUnit::new(7), 30)])
            .await
            .expect("save");

        let cached = services
            .reconciler
            .cached(anchor)
            .await
            .expect("cache read")
            .expect("summary cached");
        let listed = services
            .reconciler
            .list_cached(Granularity::Daily, anchor.date(), anchor.date())
            .await
            .expect("cache listing");

        assert_eq!((first.total_spent, first.is_complete), (0, false));
        assert_eq!(
            (cached.total_allocated, cached.total_spent, cached.is_complete),
            (
                logged.summary.total_allocated,
                logged.summary.total_spent,
                true
            )
        );
        assert_eq!(listed, vec![cached]);
    });
}

#[rstest]
fn unknown_task_rolls_back_the_whole_batch(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "fk_rollback").expect("database setup");
    let services = db.services();
    let stores = db.stores();
    let anchor = january(1);
    let clock = DefaultClock;

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        let ghost = TaskId::new();
        let mut changes = PeriodChanges::new(anchor);
        for task_id in [read.id(), ghost] {
            changes.save_entry(
                TimeEntry::new(
                    TimeEntryKey::new(task_id, anchor, SubUnit::new(7)),
                    20,
                    snapshot("Read"),
                    &clock,
                )
                .expect("valid entry"),
            );
        }
        changes.save_status(TaskPeriodStatus::tracked(read.id(), anchor, &clock));
        let summary = PeriodSummary::new(anchor, 30, 40, clock.utc());

        let result = stores.unit_of_work.commit_period(&changes, &summary).await;

        assert!(matches!(result, Err(TrackingRepositoryError::UnknownTask(id)) if id == ghost));
        assert!(
            stores
                .entries
                .list_for_period(anchor, None)
                .await
                .expect("listing")
                .is_empty()
        );
        assert_eq!(stores.statuses.find(read.id(), anchor).await.expect("lookup"), None);
        assert_eq!(stores.summaries.find(anchor).await.expect("lookup"), None);
    });
}

#[rstest]
fn status_for_unknown_task_is_rejected(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "fk_status").expect("database setup");
    let stores = db.stores();
    let anchor = january(1);
    let clock = DefaultClock;

    test_runtime().block_on(async {
        let ghost = TaskId::new();
        let mut changes = PeriodChanges::new(anchor);
        changes.save_status(TaskPeriodStatus::tracked(ghost, anchor, &clock));

        let result = stores
            .unit_of_work
            .commit_period(&changes, &PeriodSummary::new(anchor, 0, 0, clock.utc()))
            .await;

        assert!(matches!(result, Err(TrackingRepositoryError::UnknownTask(id)) if id == ghost));
    });
}

#[rstest]
fn list_range_is_inclusive_and_keeps_granularities_apart(
    shared_test_cluster: &'static TestCluster,
) {
    let db = TestDatabase::create(shared_test_cluster, "list_range").expect("database setup");
    let services = db.services();
    let stores = db.stores();
    let week = PeriodAnchor::new(Granularity::Weekly, january(1).date()).expect("Monday anchor");

    test_runtime().block_on(async {
        let read = placed_task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
        for day in 1..=4 {
            services
                .entries
                .bulk_save(january(day), vec![EntryInput::new(read.id(), SubUnit::new(7), 10)])
                .await
                .expect("daily save");
        }
        services
            .entries
            .bulk_save(week, vec![EntryInput::new(read.id(), SubUnit::new(1), 60)])
            .await
            .expect("weekly save");

        let daily = stores
            .entries
            .list_range(Granularity::Daily, january(2).date(), january(3).date())
            .await
            .expect("range listing");
        let weekly = stores
            .entries
            .list_range(Granularity::Weekly, january(1).date(), january(7).date())
            .await
            .expect("range listing");
        let summaries = stores
            .summaries
            .list_range(Granularity::Daily, january(2).date(), january(4).date())
            .await
            .expect("summary listing");

        let days: Vec<_> = daily.iter().map(|entry| entry.anchor().date()).collect();
        assert_eq!(days, vec![january(2).date(), january(3).date()]);
        assert_eq!(weekly.len(), 1);
        let summary_days: Vec<_> = summaries
            .iter()
            .map(|summary| summary.anchor.date())
            .collect();
        assert_eq!(
            summary_days,
            vec![january(2).date(), january(3).date(), january(4).date()]
        );
    });
}
