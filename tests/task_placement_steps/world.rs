//! Shared world state for task placement BDD scenarios.

use std::sync::Arc;

use laneboard::{
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{ProjectId, UserId},
        ports::TaskRepository,
        services::{BoardServiceError, ProjectService, TaskService},
    },
    lane::domain::LaneId,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for task placement behaviour tests.
pub struct PlacementWorld {
    pub store: Arc<InMemoryBoardStore>,
    pub projects: ProjectService<InMemoryBoardStore, DefaultClock>,
    pub tasks: TaskService<InMemoryBoardStore, DefaultClock>,
    pub user_id: UserId,
    pub project_id: Option<ProjectId>,
    pub last_move_error: Option<BoardServiceError>,
}

impl PlacementWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&store), clock),
            store,
            user_id: UserId::new(),
            project_id: None,
            last_move_error: None,
        }
    }

    /// Returns the scenario project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns `(title, key)` pairs of a lane in display order.
    ///
    /// # Errors
    ///
    /// Returns an error when the lane id is malformed or listing fails.
    pub fn lane(&self, lane: &str) -> Result<Vec<(String, i64)>, eyre::Report> {
        let project_id = self.project_id()?;
        let lane_id = LaneId::new(lane)?;
        let tasks = run_async(self.store.list_lane_tasks(project_id, &lane_id))?;
        Ok(tasks
            .iter()
            .map(|task| (task.title().to_owned(), task.sort_order().value()))
            .collect())
    }
}

impl Default for PlacementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlacementWorld {
    PlacementWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed entries.
pub fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Parses `"A:1000, B:2000"` into `(title, key)` pairs.
///
/// # Errors
///
/// Returns an error when an entry lacks a numeric key.
pub fn parse_listing(raw: &str) -> Result<Vec<(String, i64)>, eyre::Report> {
    entries(raw)
        .map(|entry| -> Result<(String, i64), eyre::Report> {
            let (title, key) = entry
                .rsplit_once(':')
                .ok_or_else(|| eyre::eyre!("listing entry {entry:?} has no key"))?;
            Ok((title.to_owned(), key.parse::<i64>()?))
        })
        .collect()
}
