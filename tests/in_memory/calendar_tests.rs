//! Reconciliation across coarser period granularities.

use super::helpers::{TestServices, anchor, date, services, task};
use pillarwise::{
    task::domain::Frequency,
    taxonomy::domain::Pillar,
    tracking::{
        domain::{Granularity, SubUnit, TrackingDomainError},
        services::{EntryInput, TrackingServiceError},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_tasks_only_count_in_weekly_periods(services: TestServices) {
    let call = task(&services, Pillar::Family, "Call parents", 60, Frequency::Weekly).await;
    task(&services, Pillar::Calmness, "Read", 30, Frequency::Daily).await;
    let week = anchor(Granularity::Weekly, 2024, 1, 1);

    let outcome = services
        .entries
        .bulk_save(
            week,
            vec![
                EntryInput::new(call.id(), SubUnit::new(2), 20),
                EntryInput::new(call.id(), SubUnit::new(6), 40),
            ],
        )
        .await
        .expect("bulk save should succeed");

    assert_eq!(outcome.saved, 2);
    assert_eq!(
        (outcome.summary.total_allocated, outcome.summary.total_spent),
        (60, 60)
    );
    assert!(outcome.summary.is_complete);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_day_seven_is_out_of_range(services: TestServices) {
    let call = task(&services, Pillar::Family, "Call parents", 60, Frequency::Weekly).await;

    let result = services
        .entries
        .bulk_save(
            anchor(Granularity::Weekly, 2024, 1, 1),
            vec![EntryInput::new(call.id(), SubUnit::new(7), 20)],
        )
        .await;

    assert!(matches!(
        result,
        Err(TrackingServiceError::Domain(
            TrackingDomainError::SubUnitOutOfRange { .. }
        ))
    ));
}

#[rstest]
#[case(2024, 2, 29, true)]
#[case(2023, 2, 29, false)]
#[case(2024, 4, 31, false)]
#[tokio::test(flavor = "multi_thread")]
async fn monthly_day_slots_follow_month_length(
    services: TestServices,
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] accepted: bool,
) {
    let budget = task(&services, Pillar::HardWork, "Budget review", 90, Frequency::Monthly).await;

    let result = services
        .entries
        .bulk_save(
            anchor(Granularity::Monthly, year, month, 1),
            vec![EntryInput::new(budget.id(), SubUnit::new(day), 90)],
        )
        .await;

    assert_eq!(result.is_ok(), accepted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recalculating_a_year_of_months_fills_the_cache(services: TestServices) {
    let budget = task(&services, Pillar::HardWork, "Budget review", 90, Frequency::Monthly).await;
    services
        .entries
        .bulk_save(
            anchor(Granularity::Monthly, 2024, 3, 1),
            vec![EntryInput::new(budget.id(), SubUnit::new(15), 90)],
        )
        .await
        .expect("bulk save should succeed");

    let summaries = services
        .reconciler
        .recalculate_range(Granularity::Monthly, date(2024, 1, 1), date(2024, 12, 31))
        .await
        .expect("recalculation should succeed");
    assert_eq!(summaries.len(), 12);

    let rate = services
        .analytics
        .completion_rate(Granularity::Monthly, date(2024, 1, 1), date(2024, 12, 31))
        .await
        .expect("completion rate should succeed");
    assert_eq!((rate.complete, rate.total), (1, 12));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn yearly_slots_hold_a_full_month(services: TestServices) {
    let project = task(&services, Pillar::HardWork, "Side project", 600, Frequency::Yearly).await;
    let year = anchor(Granularity::Yearly, 2024, 1, 1);

    let outcome = services
        .entries
        .bulk_save(
            year,
            vec![
                EntryInput::new(project.id(), SubUnit::new(2), 29 * 1440),
                EntryInput::new(project.id(), SubUnit::new(12), 600),
            ],
        )
        .await
        .expect("bulk save should succeed");

    assert_eq!(outcome.summary.total_allocated, 600);
    assert_eq!(outcome.summary.total_spent, 29 * 1440 + 600);
    assert!(!outcome.summary.is_complete);
}
