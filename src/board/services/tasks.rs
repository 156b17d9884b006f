//! Task creation, editing, and placement.

use super::{
    Actor, BoardServiceError, BoardServiceResult,
    access::{project_lanes, require_lane, require_membership, require_project},
};
use crate::board::{
    domain::{
        NewTaskData, ProjectId, Task, TaskChanges, TaskId, TaskPlacement, TaskPriority, UserId,
        ordering::{next_sort_order, plan_move},
    },
    ports::BoardStore,
};
use crate::lane::domain::default_task_lane_id;
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_ESTIMATE_POINTS: u32 = 1;

/// Request payload for creating a task with full details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    lane_id: Option<String>,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    tags: Vec<String>,
    estimate_points: u32,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            lane_id: None,
            priority: TaskPriority::default(),
            assignee_id: None,
            due_date: None,
            tags: Vec::new(),
            estimate_points: DEFAULT_ESTIMATE_POINTS,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Places the task in a specific lane instead of the default one.
    #[must_use]
    pub fn with_lane(mut self, lane_id: impl Into<String>) -> Self {
        self.lane_id = Some(lane_id.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee. Non-members fall back to the caller.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the estimate.
    #[must_use]
    pub const fn with_estimate_points(mut self, estimate_points: u32) -> Self {
        self.estimate_points = estimate_points;
        self
    }
}

/// Request payload for a partial task edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    lane_id: Option<String>,
    assignee_id: Option<UserId>,
    changes: TaskChanges,
}

impl UpdateTaskRequest {
    /// Creates an empty edit for `task_id`.
    #[must_use]
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            lane_id: None,
            assignee_id: None,
            changes: TaskChanges::default(),
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.changes.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.changes.description = Some(description.into());
        self
    }

    /// Moves the task to the end of another lane.
    #[must_use]
    pub fn with_lane(mut self, lane_id: impl Into<String>) -> Self {
        self.lane_id = Some(lane_id.into());
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.changes.priority = Some(priority);
        self
    }

    /// Sets a new assignee. Non-members leave the assignee unchanged.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.changes.due_date = Some(due_date);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.changes.tags = Some(tags.into_iter().collect());
        self
    }

    /// Sets a new estimate.
    #[must_use]
    pub const fn with_estimate_points(mut self, estimate_points: u32) -> Self {
        self.changes.estimate_points = Some(estimate_points);
        self
    }
}

/// Task orchestration service, including the placement engine.
#[derive(Clone)]
pub struct TaskService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task at the end of its lane and bumps the project.
    ///
    /// The lane defaults to `todo` when configured, else `backlog`. The
    /// assignee defaults to the caller, as does any assignee who is not a
    /// project member.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the caller is not a member, the
    /// project or lane does not exist, the title is blank, or storage fails.
    pub async fn create_task(
        &self,
        actor: Actor,
        request: CreateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let user_id = actor.user_id()?;
        require_membership(&*self.store, request.project_id, user_id).await?;
        let mut project = require_project(&*self.store, request.project_id).await?;
        let lanes = project_lanes(&project);

        let lane_id = match request.lane_id.as_deref() {
            Some(raw) => require_lane(&lanes, raw)?,
            None => default_task_lane_id(&lanes),
        };
        let candidate = request.assignee_id.unwrap_or(user_id);
        let assignee_id = if self.is_member(request.project_id, candidate).await? {
            candidate
        } else {
            user_id
        };

        let lane_tasks = self
            .store
            .list_lane_tasks(request.project_id, &lane_id)
            .await?;
        let task = Task::new(
            NewTaskData {
                project_id: request.project_id,
                title: request.title,
                description: request.description,
                status: lane_id,
                priority: request.priority,
                assignee_id,
                due_date: request.due_date,
                tags: request.tags,
                estimate_points: request.estimate_points,
                sort_order: next_sort_order(&lane_tasks),
            },
            &*self.clock,
        )?;

        project.touch(&*self.clock);
        self.store
            .insert_task_and_touch_project(&task, &project)
            .await?;
        Ok(task)
    }

    /// Appends a titled task to `lane_id`, assigned to the caller.
    ///
    /// Unlike [`Self::create_task`] the project timestamp is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the caller is not a member, the
    /// lane is not configured, the title is blank, or storage fails.
    pub async fn quick_add_task(
        &self,
        actor: Actor,
        project_id: ProjectId,
        lane_id: &str,
        title: &str,
    ) -> BoardServiceResult<Task> {
        let user_id = actor.user_id()?;
        require_membership(&*self.store, project_id, user_id).await?;
        let project = require_project(&*self.store, project_id).await?;
        let lane = require_lane(&project_lanes(&project), lane_id)?;

        let lane_tasks = self.store.list_lane_tasks(project_id, &lane).await?;
        let task = Task::new(
            NewTaskData {
                project_id,
                title: title.to_owned(),
                description: String::new(),
                status: lane,
                priority: TaskPriority::default(),
                assignee_id: user_id,
                due_date: None,
                tags: Vec::new(),
                estimate_points: DEFAULT_ESTIMATE_POINTS,
                sort_order: next_sort_order(&lane_tasks),
            },
            &*self.clock,
        )?;
        self.store.insert_task(&task).await?;
        Ok(task)
    }

    /// Applies a partial edit.
    ///
    /// A lane change appends the task to the end of the new lane; otherwise
    /// the key is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task does not exist, the caller
    /// is not a member, the resulting lane is not configured, the title is
    /// blank, or storage fails.
    pub async fn update_task(
        &self,
        actor: Actor,
        request: UpdateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let user_id = actor.user_id()?;
        let mut task = self.require_task(request.task_id).await?;
        require_membership(&*self.store, task.project_id(), user_id).await?;
        let project = require_project(&*self.store, task.project_id()).await?;
        let lanes = project_lanes(&project);

        let next_lane = match request.lane_id.as_deref() {
            Some(raw) => require_lane(&lanes, raw)?,
            None => require_lane(&lanes, task.status().as_str())?,
        };

        let mut changes = request.changes;
        if let Some(candidate) = request.assignee_id {
            if self.is_member(task.project_id(), candidate).await? {
                changes.assignee_id = Some(candidate);
            }
        }

        let placement = if &next_lane == task.status() {
            None
        } else {
            let lane_tasks = self
                .store
                .list_lane_tasks(task.project_id(), &next_lane)
                .await?;
            Some(next_sort_order(&lane_tasks))
        };

        task.apply_changes(changes, &*self.clock)?;
        if let Some(sort_order) = placement {
            task.relocate(next_lane, sort_order, &*self.clock);
        }
        self.store.update_task(&task).await?;
        Ok(task)
    }

    /// Moves a task to `index` within `destination_lane_id`.
    ///
    /// The index is clamped to the destination length. The destination lane
    /// is rewritten to contiguous keys and, when the task changed lanes, so
    /// is the source lane. Only tasks whose lane or key changes are written,
    /// plus the moved task itself.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`],
    /// [`BoardServiceError::NotAMember`], or [`BoardServiceError::InvalidLane`]
    /// before anything is written, and storage errors otherwise.
    pub async fn move_task(
        &self,
        actor: Actor,
        task_id: TaskId,
        destination_lane_id: &str,
        index: usize,
    ) -> BoardServiceResult<()> {
        let user_id = actor.user_id()?;
        let task = self.require_task(task_id).await?;
        require_membership(&*self.store, task.project_id(), user_id).await?;
        let project = require_project(&*self.store, task.project_id()).await?;
        let destination = require_lane(&project_lanes(&project), destination_lane_id)?;

        let source_lane = self
            .store
            .list_lane_tasks(task.project_id(), task.status())
            .await?;
        let destination_lane = if &destination == task.status() {
            Vec::new()
        } else {
            self.store
                .list_lane_tasks(task.project_id(), &destination)
                .await?
        };

        let plan = plan_move(&task, &source_lane, &destination_lane, &destination, index);
        let mut loaded: HashMap<TaskId, Task> = source_lane
            .into_iter()
            .chain(destination_lane)
            .map(|candidate| (candidate.id(), candidate))
            .collect();
        loaded.insert(task.id(), task.clone());

        let writes = apply_placements(&mut loaded, &plan.placements, &*self.clock);
        self.store.update_tasks(&writes).await?;

        info!(
            task_id = %task_id,
            from = %task.status(),
            to = %destination,
            index = plan.destination_index,
            "task moved"
        );
        debug!(task_id = %task_id, writes = writes.len(), "lanes repacked after move");
        Ok(())
    }

    async fn require_task(&self, task_id: TaskId) -> BoardServiceResult<Task> {
        self.store
            .find_task(task_id)
            .await?
            .ok_or(BoardServiceError::TaskNotFound(task_id))
    }

    async fn is_member(&self, project_id: ProjectId, user_id: UserId) -> BoardServiceResult<bool> {
        Ok(self
            .store
            .find_membership(project_id, user_id)
            .await?
            .is_some())
    }
}

/// Relocates each planned task and returns the updated copies in plan order.
pub(super) fn apply_placements(
    loaded: &mut HashMap<TaskId, Task>,
    placements: &[TaskPlacement],
    clock: &impl Clock,
) -> Vec<Task> {
    placements
        .iter()
        .filter_map(|placement| {
            let task = loaded.get_mut(&placement.task_id)?;
            task.relocate(placement.status.clone(), placement.sort_order, clock);
            Some(task.clone())
        })
        .collect()
}
