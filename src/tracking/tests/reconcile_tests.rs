//! Tests for the pure reconciliation function.

use crate::task::domain::{
    AllocatedMinutes, Frequency, Task, TaskDraft, TaskName, TaskPlacement, TaskSnapshot,
};
use crate::taxonomy::domain::{CategoryId, Pillar};
use crate::test_support::{clock_on, date};
use crate::tracking::domain::{
    Granularity, PeriodAnchor, SubUnit, TaskPeriodStatus, TimeEntry, TimeEntryKey, reconcile,
};
use chrono::NaiveDate;
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> MockClock {
    clock_on(date(2024, 1, 1))
}

fn daily(day: NaiveDate) -> PeriodAnchor {
    PeriodAnchor::new(Granularity::Daily, day).expect("any date anchors a day")
}

fn task(name: &str, minutes: u64, frequency: Frequency, clock: &MockClock) -> Task {
    Task::new(
        TaskDraft {
            name: TaskName::new(name).expect("valid name"),
            placement: TaskPlacement::new(Pillar::Calmness, CategoryId::new()),
            allocated_minutes: AllocatedMinutes::new(minutes).expect("valid allocation"),
            frequency,
        },
        clock,
    )
}

fn entry(task: &Task, anchor: PeriodAnchor, hour: u32, minutes: u32, clock: &MockClock) -> TimeEntry {
    TimeEntry::new(
        TimeEntryKey::new(task.id(), anchor, SubUnit::new(hour)),
        minutes,
        TaskSnapshot {
            task_name: task.name().as_str().to_owned(),
            pillar: task.pillar(),
            category_name: "Reading".to_owned(),
            sub_category_name: None,
        },
        clock,
    )
    .expect("valid entry")
}

#[rstest]
fn read_example_moves_from_incomplete_to_complete_to_over(clock: MockClock) {
    let anchor = daily(date(2024, 1, 1));
    let read = task("Read", 30, Frequency::Daily, &clock);
    let tasks = vec![read.clone()];

    let empty = reconcile(anchor, &tasks, &[], &[], clock.utc());
    assert_eq!((empty.total_allocated, empty.total_spent, empty.is_complete), (30, 0, false));

    let first = entry(&read, anchor, 7, 30, &clock);
    let exact = reconcile(anchor, &tasks, &[first.clone()], &[], clock.utc());
    assert_eq!((exact.total_allocated, exact.total_spent, exact.is_complete), (30, 30, true));

    let second = entry(&read, anchor, 21, 15, &clock);
    let over = reconcile(anchor, &tasks, &[first, second], &[], clock.utc());
    assert_eq!((over.total_allocated, over.total_spent, over.is_complete), (30, 45, false));
}

#[rstest]
fn nothing_allocated_and_nothing_spent_is_incomplete(clock: MockClock) {
    let summary = reconcile(daily(date(2024, 1, 1)), &[], &[], &[], clock.utc());
    assert_eq!(summary.total_allocated, 0);
    assert!(!summary.is_complete);
}

#[rstest]
fn only_tasks_of_the_matching_frequency_count(clock: MockClock) {
    let tasks = vec![
        task("Read", 30, Frequency::Daily, &clock),
        task("Call parents", 60, Frequency::Weekly, &clock),
        task("Ship release", 600, Frequency::OneTime, &clock),
    ];
    let summary = reconcile(daily(date(2024, 1, 1)), &tasks, &[], &[], clock.utc());
    assert_eq!(summary.total_allocated, 30);
}

#[rstest]
fn inactive_tasks_do_not_count(clock: MockClock) {
    let mut paused = task("Read", 30, Frequency::Daily, &clock);
    paused.set_active(false, &clock).expect("deactivate");
    let summary = reconcile(daily(date(2024, 1, 1)), &[paused], &[], &[], clock.utc());
    assert_eq!(summary.total_allocated, 0);
}

#[rstest]
#[case(date(2024, 1, 9), 30)]
#[case(date(2024, 1, 10), 0)]
#[case(date(2024, 1, 11), 0)]
fn global_completion_excludes_periods_on_or_after_its_date(
    clock: MockClock,
    #[case] period: NaiveDate,
    #[case] allocated: u64,
) {
    let mut read = task("Read", 30, Frequency::Daily, &clock);
    read.complete(&clock_on(date(2024, 1, 10))).expect("complete");

    let summary = reconcile(daily(period), &[read], &[], &[], clock.utc());
    assert_eq!(summary.total_allocated, allocated);
}

#[rstest]
fn global_na_excludes_like_completion(clock: MockClock) {
    let mut read = task("Read", 30, Frequency::Daily, &clock);
    read.mark_na(&clock).expect("mark NA");
    let summary = reconcile(daily(date(2024, 1, 1)), &[read], &[], &[], clock.utc());
    assert_eq!(summary.total_allocated, 0);
}

#[rstest]
fn period_statuses_override_allocation_but_not_spent(clock: MockClock) {
    let anchor = daily(date(2024, 1, 1));
    let read = task("Read", 30, Frequency::Daily, &clock);
    let walk = task("Walk", 20, Frequency::Daily, &clock);
    let nap = task("Nap", 15, Frequency::Daily, &clock);

    let mut read_done = TaskPeriodStatus::tracked(read.id(), anchor, &clock);
    read_done.complete(&clock);
    let mut walk_na = TaskPeriodStatus::tracked(walk.id(), anchor, &clock);
    walk_na.mark_na(&clock);
    let nap_tracked = TaskPeriodStatus::tracked(nap.id(), anchor, &clock);

    let entries = vec![entry(&read, anchor, 8, 25, &clock)];
    let summary = reconcile(
        anchor,
        &[read, walk, nap],
        &entries,
        &[read_done, walk_na, nap_tracked],
        clock.utc(),
    );

    assert_eq!(summary.total_allocated, 15);
    assert_eq!(summary.total_spent, 25);
    assert!(!summary.is_complete);
}

#[rstest]
fn inputs_from_other_periods_are_ignored(clock: MockClock) {
    let monday = daily(date(2024, 1, 1));
    let tuesday = daily(date(2024, 1, 2));
    let read = task("Read", 30, Frequency::Daily, &clock);
    let mut other_day = TaskPeriodStatus::tracked(read.id(), tuesday, &clock);
    other_day.mark_na(&clock);

    let summary = reconcile(
        monday,
        &[read.clone()],
        &[entry(&read, tuesday, 9, 30, &clock)],
        &[other_day],
        clock.utc(),
    );

    assert_eq!(summary.total_allocated, 30);
    assert_eq!(summary.total_spent, 0);
}

#[rstest]
fn weekly_periods_use_weekly_tasks(clock: MockClock) {
    let anchor = PeriodAnchor::new(Granularity::Weekly, date(2024, 1, 1)).expect("Monday");
    let call = task("Call parents", 60, Frequency::Weekly, &clock);
    let entries = vec![
        entry(&call, anchor, 2, 30, &clock),
        entry(&call, anchor, 5, 30, &clock),
    ];
    let summary = reconcile(anchor, &[call], &entries, &[], clock.utc());
    assert!(summary.is_complete);
    assert_eq!(summary.total_spent, 60);
}
