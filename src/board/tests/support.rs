//! Shared fixtures for board unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{
        EmailAddress, NewTaskData, Profile, ProjectId, SortOrder, Task, TaskPriority, UserId,
    },
    ports::{ProfileDirectory, TaskRepository},
    services::{
        Actor, CreateProjectRequest, LaneLifecycleService, MembershipService, ProjectService,
        TaskService,
    },
};
use crate::config::MemberSearchSettings;
use crate::lane::domain::LaneId;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock that advances one second on every reading.
#[derive(Debug)]
pub struct StepClock {
    seconds: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            seconds: AtomicI64::new(1_700_000_000),
        }
    }

    /// Returns the time the next reading would produce, without advancing.
    pub fn peek(&self) -> DateTime<Utc> {
        at(self.seconds.load(Ordering::SeqCst))
    }
}

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .expect("test timestamps are unambiguous")
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        at(self.seconds.fetch_add(1, Ordering::SeqCst))
    }
}

/// Services wired to one shared in-memory store.
pub struct Board {
    pub store: Arc<InMemoryBoardStore>,
    pub clock: Arc<StepClock>,
    pub projects: ProjectService<InMemoryBoardStore, StepClock>,
    pub tasks: TaskService<InMemoryBoardStore, StepClock>,
    pub lanes: LaneLifecycleService<InMemoryBoardStore, StepClock>,
    pub members: MembershipService<InMemoryBoardStore, StepClock>,
}

impl Board {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let clock = Arc::new(StepClock::new());
        Self {
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            lanes: LaneLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            members: MembershipService::new(
                Arc::clone(&store),
                Arc::clone(&clock),
                MemberSearchSettings::default(),
            ),
            store,
            clock,
        }
    }

    /// Creates a default-lane project owned by `owner`.
    pub async fn project(&self, owner: UserId) -> ProjectId {
        self.projects
            .create_project(Actor::User(owner), CreateProjectRequest::new("Apollo"))
            .await
            .expect("project creation should succeed")
            .id()
    }

    /// Quick-adds tasks titled by `titles` to `lane`, returning them in order.
    pub async fn fill(
        &self,
        actor: UserId,
        project_id: ProjectId,
        lane: &str,
        titles: &[&str],
    ) -> Vec<Task> {
        let mut created = Vec::with_capacity(titles.len());
        for title in titles {
            created.push(
                self.tasks
                    .quick_add_task(Actor::User(actor), project_id, lane, title)
                    .await
                    .expect("quick add should succeed"),
            );
        }
        created
    }

    /// Returns the titles of a lane in display order.
    pub async fn titles(&self, project_id: ProjectId, lane: &str) -> Vec<String> {
        self.lane_tasks(project_id, lane)
            .await
            .iter()
            .map(|task| task.title().to_owned())
            .collect()
    }

    /// Returns the keys of a lane in display order.
    pub async fn keys(&self, project_id: ProjectId, lane: &str) -> Vec<i64> {
        self.lane_tasks(project_id, lane)
            .await
            .iter()
            .map(|task| task.sort_order().value())
            .collect()
    }

    pub async fn lane_tasks(&self, project_id: ProjectId, lane: &str) -> Vec<Task> {
        self.store
            .list_lane_tasks(project_id, &lane_id(lane))
            .await
            .expect("lane listing should succeed")
    }

    /// Registers a directory profile.
    pub async fn register(&self, user_id: UserId, email: &str) {
        let profile = Profile::new(
            user_id,
            EmailAddress::new(email).expect("valid email"),
            None,
            None,
        );
        self.store
            .upsert_profile(&profile)
            .await
            .expect("profile upsert should succeed");
    }
}

pub fn lane_id(raw: &str) -> LaneId {
    LaneId::new(raw).expect("valid lane id")
}

/// Builds a detached task for pure planning tests.
pub fn task(project_id: ProjectId, lane: &str, sort_order: i64, clock: &impl Clock) -> Task {
    Task::new(
        NewTaskData {
            project_id,
            title: format!("{lane}-{sort_order}"),
            description: String::new(),
            status: lane_id(lane),
            priority: TaskPriority::Medium,
            assignee_id: UserId::new(),
            due_date: None,
            tags: Vec::new(),
            estimate_points: 1,
            sort_order: SortOrder::new(sort_order),
        },
        clock,
    )
    .expect("valid task")
}
