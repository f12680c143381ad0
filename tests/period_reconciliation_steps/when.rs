//! When steps for period reconciliation BDD scenarios.

use super::world::{PeriodWorld, granularity, run_async};
use pillarwise::tracking::{
    domain::{PeriodAnchor, SubUnit},
    services::{EntryInput, TrackingServiceError},
};
use rstest_bdd_macros::when;

#[when(
    r#"{minutes:u32} minutes are logged for "{name}" in the {period} period {date} at slot {slot:u32}"#
)]
fn log_minutes(
    world: &mut PeriodWorld,
    minutes: u32,
    name: String,
    period: String,
    date: String,
    slot: u32,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    let anchor = match PeriodAnchor::parse(granularity(&period)?, &date) {
        Ok(anchor) => anchor,
        Err(err) => {
            world.last_error = Some(TrackingServiceError::Domain(err));
            return Ok(());
        }
    };

    let input = EntryInput::new(task_id, SubUnit::new(slot), minutes);
    match run_async(world.services.entries.bulk_save(anchor, vec![input])) {
        Ok(outcome) => world.last_summary = Some(outcome.summary),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#""{name}" is marked not applicable in the {period} period {date}"#)]
fn mark_not_applicable(
    world: &mut PeriodWorld,
    name: String,
    period: String,
    date: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    let anchor = PeriodAnchor::parse(granularity(&period)?, &date)?;
    let outcome = run_async(world.services.statuses.mark_na(task_id, anchor))?;
    world.last_summary = Some(outcome.summary);
    Ok(())
}

#[when(r#""{name}" is marked complete in the {period} period {date}"#)]
fn mark_complete(
    world: &mut PeriodWorld,
    name: String,
    period: String,
    date: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    let anchor = PeriodAnchor::parse(granularity(&period)?, &date)?;
    let outcome = run_async(world.services.statuses.mark_complete(task_id, anchor))?;
    world.last_summary = Some(outcome.summary);
    Ok(())
}
