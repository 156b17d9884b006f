//! Given steps for task placement BDD scenarios.

use super::world::{PlacementWorld, entries, run_async};
use eyre::WrapErr;
use laneboard::board::services::{Actor, CreateProjectRequest};
use rstest_bdd_macros::given;

#[given("a project owned by the current user")]
fn project_owned_by_current_user(world: &mut PlacementWorld) -> Result<(), eyre::Report> {
    let project = run_async(world.projects.create_project(
        Actor::User(world.user_id),
        CreateProjectRequest::new("Placement"),
    ))
    .wrap_err("create project for placement scenario")?;
    world.project_id = Some(project.id());
    Ok(())
}

#[given(r#"lane "{lane}" holds tasks "{titles}""#)]
fn lane_holds_tasks(
    world: &mut PlacementWorld,
    lane: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    for title in entries(&titles) {
        run_async(world.tasks.quick_add_task(
            Actor::User(world.user_id),
            project_id,
            &lane,
            title,
        ))
        .wrap_err_with(|| format!("quick add {title:?} to {lane:?}"))?;
    }
    Ok(())
}
