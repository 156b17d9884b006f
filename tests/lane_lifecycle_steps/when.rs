//! When steps for lane lifecycle BDD scenarios.

use super::world::{LaneWorld, entries, run_async};
use laneboard::{
    board::services::Actor,
    lane::domain::{LaneDraft, LaneMapping},
};
use rstest_bdd_macros::when;

fn change_lanes(
    world: &mut LaneWorld,
    names: &str,
    mappings: &[LaneMapping],
) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let drafts: Vec<LaneDraft> = entries(names).map(LaneDraft::named).collect();
    let result = run_async(world.lanes.update_project_lanes(
        Actor::User(world.user_id),
        project_id,
        &drafts,
        mappings,
    ));
    world.last_change_error = result.err();
    Ok(())
}

#[when(r#"the lanes are changed to "{names}" with mappings "{mappings}""#)]
fn change_lanes_with_mappings(
    world: &mut LaneWorld,
    names: String,
    mappings: String,
) -> Result<(), eyre::Report> {
    let parsed = entries(&mappings)
        .map(|entry| -> Result<LaneMapping, eyre::Report> {
            let (from, to) = entry
                .split_once(':')
                .ok_or_else(|| eyre::eyre!("mapping {entry:?} is not from:to"))?;
            Ok(LaneMapping::parse(from, to)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    change_lanes(world, &names, &parsed)
}

#[when(r#"the lanes are changed to "{names}" with no mappings"#)]
fn change_lanes_without_mappings(world: &mut LaneWorld, names: String) -> Result<(), eyre::Report> {
    change_lanes(world, &names, &[])
}
