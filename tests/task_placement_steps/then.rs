//! Then steps for task placement BDD scenarios.

use super::world::{PlacementWorld, parse_listing};
use laneboard::board::services::BoardServiceError;
use rstest_bdd_macros::then;

#[then(r#"lane "{lane}" lists "{expected}""#)]
fn lane_lists(world: &PlacementWorld, lane: String, expected: String) -> Result<(), eyre::Report> {
    let actual = world.lane(&lane)?;
    let wanted = parse_listing(&expected)?;
    eyre::ensure!(
        actual == wanted,
        "lane {lane:?} expected {wanted:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the move fails with an invalid lane error")]
fn move_fails_with_invalid_lane(world: &PlacementWorld) -> Result<(), eyre::Report> {
    match &world.last_move_error {
        Some(BoardServiceError::InvalidLane(_)) => Ok(()),
        other => Err(eyre::eyre!("expected InvalidLane error, got {other:?}")),
    }
}
