//! Task persistence tests.

use super::helpers::{insert_owned_project, store, task};
use laneboard::board::{
    domain::{SortOrder, UserId},
    ports::{BoardStoreError, TaskRepository},
};
use laneboard::lane::domain::LaneId;
use mockable::DefaultClock;

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn lane_listing_orders_by_key_then_insertion() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;
    for (title, key) in [("late", 3000), ("tie-a", 1000), ("tie-b", 1000), ("other", 2000)] {
        store
            .insert_task(&task(project.id(), "todo", title, key))
            .await
            .expect("insert should succeed");
    }
    store
        .insert_task(&task(project.id(), "done", "elsewhere", 1000))
        .await
        .expect("insert should succeed");

    let lane = store
        .list_lane_tasks(project.id(), &LaneId::new("todo").expect("valid lane id"))
        .await
        .expect("listing should succeed");

    let titles: Vec<&str> = lane.iter().map(|entry| entry.title()).collect();
    assert_eq!(titles, ["tie-a", "tie-b", "other", "late"]);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn batch_with_unknown_task_writes_nothing() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;
    let mut stored = task(project.id(), "todo", "kept", 1000);
    store
        .insert_task(&stored)
        .await
        .expect("insert should succeed");
    let phantom = task(project.id(), "todo", "phantom", 2000);

    stored.relocate(
        LaneId::new("done").expect("valid lane id"),
        SortOrder::new(5000),
        &DefaultClock,
    );
    let result = store.update_tasks(&[stored.clone(), phantom.clone()]).await;
    let reloaded = store
        .find_task(stored.id())
        .await
        .expect("lookup should succeed")
        .expect("task exists");

    assert!(matches!(result, Err(BoardStoreError::TaskNotFound(id)) if id == phantom.id()));
    assert_eq!(reloaded.status().as_str(), "todo");
    assert_eq!(reloaded.sort_order(), SortOrder::new(1000));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn batch_update_persists_every_task() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;
    let mut first = task(project.id(), "review", "first", 1000);
    let mut second = task(project.id(), "review", "second", 2000);
    for entry in [&first, &second] {
        store.insert_task(entry).await.expect("insert should succeed");
    }
    let done = LaneId::new("done").expect("valid lane id");
    first.relocate(done.clone(), SortOrder::new(1000), &DefaultClock);
    second.relocate(done.clone(), SortOrder::new(2000), &DefaultClock);

    store
        .update_tasks(&[first.clone(), second.clone()])
        .await
        .expect("batch update should succeed");
    let lane = store
        .list_lane_tasks(project.id(), &done)
        .await
        .expect("listing should succeed");

    let ids: Vec<_> = lane.iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, [first.id(), second.id()]);
    assert!(lane.iter().all(|entry| entry.tags() == ["db".to_owned()]));
}
