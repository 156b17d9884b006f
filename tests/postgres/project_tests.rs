//! Project and membership persistence tests.

use super::helpers::{insert_owned_project, store, task};
use laneboard::board::{
    domain::{
        Membership, PersistedMembershipData, PersistedProjectData, Project, ProjectRole,
        SortOrder, UserId,
    },
    ports::{BoardStoreError, MembershipRepository, ProjectRepository, TaskRepository},
};
use laneboard::lane::domain::{Lane, LaneDraft, LaneId, default_project_lanes};
use mockable::DefaultClock;

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn project_lanes_survive_a_round_trip() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;

    let loaded = store
        .find_project(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project exists");

    assert_eq!(loaded.lanes(), default_project_lanes());
    assert_eq!(loaded.name(), "Apollo");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn null_lane_config_is_stored_as_null() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;
    let cleared = Project::from_persisted(PersistedProjectData {
        id: project.id(),
        name: project.name().to_owned(),
        description: "no lanes".to_owned(),
        theme_color: project.theme_color().to_owned(),
        lanes: None,
        created_by: project.created_by(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    });

    store
        .update_project(&cleared)
        .await
        .expect("update should succeed");
    let loaded = store
        .find_project(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project exists");

    assert_eq!(loaded.stored_lanes(), None::<&[LaneDraft]>);
    assert_eq!(loaded.description(), "no lanes");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn second_membership_for_same_user_is_rejected() {
    let store = store();
    let owner = UserId::new();
    let project = insert_owned_project(&store, owner).await;
    let second = Membership::new(project.id(), owner, ProjectRole::Member, owner, &DefaultClock);

    let result = store.insert_membership(&second).await;

    assert!(matches!(
        result,
        Err(BoardStoreError::DuplicateMembership { .. })
    ));
    let listed = store
        .list_user_memberships(owner)
        .await
        .expect("listing should succeed");
    let roles: Vec<_> = listed.iter().map(Membership::role).collect();
    assert_eq!(roles, [ProjectRole::Owner]);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn colliding_owner_row_rolls_back_project_insert() {
    let store = store();
    let owner = UserId::new();
    let taken = insert_owned_project(&store, owner).await;
    let fresh = Project::new(
        "Gemini",
        "",
        "#0f766e",
        &default_project_lanes(),
        owner,
        &DefaultClock,
    )
    .expect("valid project");
    let reused_id = Membership::from_persisted(PersistedMembershipData {
        id: store
            .find_membership(taken.id(), owner)
            .await
            .expect("lookup should succeed")
            .expect("owner row exists")
            .id(),
        project_id: fresh.id(),
        user_id: owner,
        role: ProjectRole::Owner,
        added_by: owner,
        created_at: fresh.created_at(),
    });

    let result = store.insert_project_with_owner(&fresh, &reused_id).await;

    assert!(result.is_err(), "primary key collision must fail the insert");
    let found = store
        .find_project(fresh.id())
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs a PostgreSQL database in LANEBOARD_TEST_DATABASE_URL"]
async fn lane_replacement_rolls_back_when_a_task_is_missing() {
    let store = store();
    let project = insert_owned_project(&store, UserId::new()).await;
    let mut in_review = task(project.id(), "review", "in review", 1000);
    store
        .insert_task(&in_review)
        .await
        .expect("insert should succeed");
    let phantom = task(project.id(), "review", "phantom", 2000);

    let next: Vec<Lane> = default_project_lanes()
        .into_iter()
        .filter(|lane| lane.id().as_str() != "review")
        .collect();
    let mut replaced = project.clone();
    replaced.replace_lanes(&next, &DefaultClock);
    in_review.relocate(
        LaneId::new("done").expect("valid lane id"),
        SortOrder::new(1000),
        &DefaultClock,
    );
    let result = store
        .replace_project_lanes(&replaced, &[in_review.clone(), phantom.clone()])
        .await;

    assert!(matches!(result, Err(BoardStoreError::TaskNotFound(id)) if id == phantom.id()));
    let reloaded = store
        .find_project(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project exists");
    assert_eq!(reloaded.lanes(), default_project_lanes());
    let kept = store
        .find_task(in_review.id())
        .await
        .expect("lookup should succeed")
        .expect("task exists");
    assert_eq!(kept.status().as_str(), "review");
}
