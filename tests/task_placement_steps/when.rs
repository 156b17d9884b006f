//! When steps for task placement BDD scenarios.

use super::world::{PlacementWorld, run_async};
use laneboard::board::{ports::TaskRepository, services::Actor};
use rstest_bdd_macros::when;

#[when(r#"task "{title}" is moved to lane "{lane}" at position {index:usize}"#)]
fn move_task(
    world: &mut PlacementWorld,
    title: String,
    lane: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let task = run_async(world.store.list_project_tasks(project_id))?
        .into_iter()
        .find(|task| task.title() == title)
        .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario project"))?;

    let result = run_async(world.tasks.move_task(
        Actor::User(world.user_id),
        task.id(),
        &lane,
        index,
    ));
    world.last_move_error = result.err();
    Ok(())
}
