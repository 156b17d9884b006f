//! Shared fixtures for in-memory board integration tests.

use std::sync::Arc;

use laneboard::{
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{ProjectId, UserId},
        ports::TaskRepository,
        services::{
            Actor, CreateProjectRequest, LaneLifecycleService, MembershipService, ProjectService,
            TaskService,
        },
    },
    config::MemberSearchSettings,
    lane::domain::LaneId,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Board services sharing one in-memory store.
pub struct BoardHarness {
    pub store: Arc<InMemoryBoardStore>,
    pub projects: ProjectService<InMemoryBoardStore, DefaultClock>,
    pub tasks: TaskService<InMemoryBoardStore, DefaultClock>,
    pub lanes: LaneLifecycleService<InMemoryBoardStore, DefaultClock>,
    pub members: MembershipService<InMemoryBoardStore, DefaultClock>,
}

impl BoardHarness {
    /// Creates a default-lane project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when project creation fails.
    pub async fn create_project(&self, owner: UserId) -> Result<ProjectId, eyre::Report> {
        let project = self
            .projects
            .create_project(Actor::User(owner), CreateProjectRequest::new("Apollo"))
            .await?;
        Ok(project.id())
    }

    /// Quick-adds each title to `lane` in order.
    ///
    /// # Errors
    ///
    /// Returns an error when any quick add fails.
    pub async fn seed_lane(
        &self,
        owner: UserId,
        project_id: ProjectId,
        lane: &str,
        titles: &[&str],
    ) -> Result<(), eyre::Report> {
        for title in titles {
            self.tasks
                .quick_add_task(Actor::User(owner), project_id, lane, title)
                .await?;
        }
        Ok(())
    }

    /// Returns the titles and keys of a lane in display order.
    ///
    /// # Errors
    ///
    /// Returns an error when the lane identifier is malformed or the listing
    /// fails.
    pub async fn lane(
        &self,
        project_id: ProjectId,
        lane: &str,
    ) -> Result<Vec<(String, i64)>, eyre::Report> {
        let tasks = self
            .store
            .list_lane_tasks(project_id, &LaneId::new(lane)?)
            .await?;
        Ok(tasks
            .iter()
            .map(|task| (task.title().to_owned(), task.sort_order().value()))
            .collect())
    }
}

/// Provides a fresh harness for each test.
#[fixture]
pub fn harness() -> BoardHarness {
    let store = Arc::new(InMemoryBoardStore::new());
    let clock = Arc::new(DefaultClock);
    BoardHarness {
        projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
        lanes: LaneLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
        members: MembershipService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            MemberSearchSettings::default(),
        ),
        store,
    }
}

/// Builds the expected `(title, key)` listing for a lane.
pub fn listing(entries: &[(&str, i64)]) -> Vec<(String, i64)> {
    entries
        .iter()
        .map(|&(title, key)| (title.to_owned(), key))
        .collect()
}
