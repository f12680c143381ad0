//! Given steps for period reconciliation BDD scenarios.

use super::world::{PeriodWorld, run_async};
use eyre::WrapErr;
use pillarwise::{
    task::{
        domain::{Frequency, TaskPlacement},
        services::CreateTaskRequest,
    },
    taxonomy::{domain::Pillar, services::CreateCategoryRequest},
};
use rstest_bdd_macros::given;

#[given(r#"a {frequency} "{pillar}" task "{name}" allocated {minutes:u64} minutes"#)]
fn task_with_allocation(
    world: &mut PeriodWorld,
    frequency: String,
    pillar: String,
    name: String,
    minutes: u64,
) -> Result<(), eyre::Report> {
    let parsed_frequency = Frequency::try_from(frequency.as_str())
        .map_err(|err| eyre::eyre!("invalid frequency in scenario: {err}"))?;
    let parsed_pillar = Pillar::try_from(pillar.as_str())
        .map_err(|err| eyre::eyre!("invalid pillar in scenario: {err}"))?;

    let category = run_async(world.services.taxonomy.create_category(
        CreateCategoryRequest::new(parsed_pillar, format!("{name} category")),
    ))
    .wrap_err("create category for scenario task")?;
    let task = run_async(world.services.tasks.create(CreateTaskRequest::new(
        name.clone(),
        TaskPlacement::new(parsed_pillar, category.id()),
        minutes,
        parsed_frequency,
    )))
    .wrap_err("create scenario task")?;

    world.tasks.insert(name, task);
    Ok(())
}
