//! Project creation, task placement, and board reads against the
//! in-memory store.

use super::helpers::{BoardHarness, harness, listing};
use laneboard::board::{
    domain::{ProjectId, TaskId, TaskPriority, UserId},
    ports::TaskRepository,
    services::{Actor, BoardServiceError, CreateTaskRequest, UpdateTaskRequest},
};
use rstest::rstest;

async fn task_id(harness: &BoardHarness, project_id: ProjectId, title: &str) -> TaskId {
    harness
        .store
        .list_project_tasks(project_id)
        .await
        .expect("listing should succeed")
        .into_iter()
        .find(|task| task.title() == title)
        .map(|task| task.id())
        .expect("seeded task exists")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quick_add_appends_in_steps_of_one_thousand(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");

    harness
        .seed_lane(owner, project_id, "todo", &["A", "B", "C"])
        .await
        .expect("seeding should succeed");

    assert_eq!(
        harness.lane(project_id, "todo").await.expect("lane"),
        listing(&[("A", 1000), ("B", 2000), ("C", 3000)])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_lane_move_repacks_both_lanes(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");
    harness
        .seed_lane(owner, project_id, "todo", &["A", "B", "C"])
        .await
        .expect("seeding should succeed");
    harness
        .seed_lane(owner, project_id, "in_progress", &["D", "E"])
        .await
        .expect("seeding should succeed");
    let moving = task_id(&harness, project_id, "B").await;

    harness
        .tasks
        .move_task(Actor::User(owner), moving, "in_progress", 1)
        .await
        .expect("move should succeed");

    assert_eq!(
        harness.lane(project_id, "todo").await.expect("lane"),
        listing(&[("A", 1000), ("C", 2000)])
    );
    assert_eq!(
        harness.lane(project_id, "in_progress").await.expect("lane"),
        listing(&[("D", 1000), ("B", 2000), ("E", 3000)])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_index_lands_at_lane_end(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");
    harness
        .seed_lane(owner, project_id, "todo", &["A", "B", "C"])
        .await
        .expect("seeding should succeed");
    let moving = task_id(&harness, project_id, "A").await;

    harness
        .tasks
        .move_task(Actor::User(owner), moving, "todo", 99)
        .await
        .expect("move should succeed");

    assert_eq!(
        harness.lane(project_id, "todo").await.expect("lane"),
        listing(&[("B", 1000), ("C", 2000), ("A", 3000)])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_lane_appends_to_destination(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");
    harness
        .seed_lane(owner, project_id, "review", &["R1", "R2"])
        .await
        .expect("seeding should succeed");
    let created = harness
        .tasks
        .create_task(
            Actor::User(owner),
            CreateTaskRequest::new(project_id, "Ship it")
                .with_priority(TaskPriority::High)
                .with_tags(["release".to_owned()]),
        )
        .await
        .expect("task creation should succeed");

    let updated = harness
        .tasks
        .update_task(
            Actor::User(owner),
            UpdateTaskRequest::new(created.id())
                .with_lane("review")
                .with_title("Ship it now"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.status().as_str(), "review");
    assert_eq!(updated.priority(), TaskPriority::High);
    assert_eq!(
        harness.lane(project_id, "review").await.expect("lane"),
        listing(&[("R1", 1000), ("R2", 2000), ("Ship it now", 3000)])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_moves_in_display_order(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");
    harness
        .seed_lane(owner, project_id, "backlog", &["Idea"])
        .await
        .expect("seeding should succeed");
    harness
        .seed_lane(owner, project_id, "done", &["Shipped"])
        .await
        .expect("seeding should succeed");
    let idea = task_id(&harness, project_id, "Idea").await;
    harness
        .tasks
        .move_task(Actor::User(owner), idea, "done", 0)
        .await
        .expect("move should succeed");

    let board = harness
        .projects
        .get_board(Actor::User(owner), project_id)
        .await
        .expect("board should load");

    let titles: Vec<&str> = board.tasks.iter().map(|task| task.title()).collect();
    assert_eq!(titles, ["Idea", "Shipped"]);
    let done = board
        .project
        .lanes
        .iter()
        .find(|entry| entry.lane.id().as_str() == "done")
        .map(|entry| entry.task_count);
    assert_eq!(done, Some(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_callers_are_turned_away(harness: BoardHarness) {
    let owner = UserId::new();
    let project_id = harness.create_project(owner).await.expect("project");

    let result = harness
        .tasks
        .quick_add_task(Actor::Anonymous, project_id, "todo", "Sneaky")
        .await;

    assert!(matches!(result, Err(BoardServiceError::Unauthenticated)));
}
