//! Then steps for period reconciliation BDD scenarios.

use super::world::{PeriodWorld, granularity, run_async};
use pillarwise::tracking::{
    domain::{PeriodAnchor, TrackingDomainError},
    services::TrackingServiceError,
};
use rstest_bdd_macros::then;

#[then(
    "the {period} summary for {date} shows {allocated:u64} allocated and {spent:u64} spent"
)]
fn summary_shows(
    world: &mut PeriodWorld,
    period: String,
    date: String,
    allocated: u64,
    spent: u64,
) -> Result<(), eyre::Report> {
    let anchor = PeriodAnchor::parse(granularity(&period)?, &date)?;
    let summary = run_async(world.services.reconciler.reconcile(anchor))?;

    if (summary.total_allocated, summary.total_spent) != (allocated, spent) {
        return Err(eyre::eyre!(
            "expected {allocated} allocated and {spent} spent, found {} and {}",
            summary.total_allocated,
            summary.total_spent
        ));
    }
    world.last_summary = Some(summary);
    Ok(())
}

#[then("the period is complete")]
fn period_is_complete(world: &PeriodWorld) -> Result<(), eyre::Report> {
    let summary = world
        .last_summary
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing summary"))?;
    if !summary.is_complete {
        return Err(eyre::eyre!("expected a complete period, got {summary:?}"));
    }
    Ok(())
}

#[then("the period is not complete")]
fn period_is_not_complete(world: &PeriodWorld) -> Result<(), eyre::Report> {
    let summary = world
        .last_summary
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing summary"))?;
    if summary.is_complete {
        return Err(eyre::eyre!("expected an incomplete period, got {summary:?}"));
    }
    Ok(())
}

#[then("the request is rejected as a non-canonical anchor")]
fn rejected_as_non_canonical(world: &PeriodWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(TrackingServiceError::Domain(TrackingDomainError::NonCanonicalAnchor { .. })) => {
            Ok(())
        }
        other => Err(eyre::eyre!("expected NonCanonicalAnchor, got {other:?}")),
    }
}

#[then("the request is rejected for exceeding slot capacity")]
fn rejected_for_capacity(world: &PeriodWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(TrackingServiceError::Domain(TrackingDomainError::MinutesExceedCapacity {
            ..
        })) => Ok(()),
        other => Err(eyre::eyre!("expected MinutesExceedCapacity, got {other:?}")),
    }
}
