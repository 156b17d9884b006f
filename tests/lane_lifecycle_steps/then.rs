//! Then steps for lane lifecycle BDD scenarios.

use super::world::{LaneWorld, entries, parse_listing};
use laneboard::{board::services::BoardServiceError, lane::domain::LaneRemapError};
use rstest_bdd_macros::then;

#[then(r#"lane "{lane}" lists "{expected}""#)]
fn lane_lists(world: &LaneWorld, lane: String, expected: String) -> Result<(), eyre::Report> {
    let actual = world.lane(&lane)?;
    let wanted = parse_listing(&expected)?;
    eyre::ensure!(
        actual == wanted,
        "lane {lane:?} expected {wanted:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the project lanes are "{expected}""#)]
fn project_lanes_are(world: &LaneWorld, expected: String) -> Result<(), eyre::Report> {
    let actual = world.lane_ids()?;
    let wanted: Vec<&str> = entries(&expected).collect();
    eyre::ensure!(
        actual == wanted,
        "expected lanes {wanted:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the change asks for a destination for lane "{lane}""#)]
fn change_asks_for_destination(world: &LaneWorld, lane: String) -> Result<(), eyre::Report> {
    match &world.last_change_error {
        Some(BoardServiceError::Remap(LaneRemapError::MissingDestinationMapping(missing)))
            if missing.as_str() == lane =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected a missing mapping for {lane:?}, got {other:?}"
        )),
    }
}

#[then(r#"the change fails because "{from}" cannot move into "{to}""#)]
fn change_fails_with_invalid_destination(
    world: &LaneWorld,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    match &world.last_change_error {
        Some(BoardServiceError::Remap(LaneRemapError::InvalidDestination {
            from: actual_from,
            to: actual_to,
        })) if actual_from.as_str() == from && actual_to.as_str() == to => Ok(()),
        other => Err(eyre::eyre!(
            "expected {from:?} -> {to:?} to be rejected, got {other:?}"
        )),
    }
}
