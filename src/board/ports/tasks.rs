//! Repository port for tasks.

use super::BoardStoreResult;
use crate::board::domain::{Project, ProjectId, Task, TaskId};
use crate::lane::domain::LaneId;
use async_trait::async_trait;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::DuplicateTask`] when the identifier
    /// already exists.
    async fn insert_task(&self, task: &Task) -> BoardStoreResult<()>;

    /// Stores a new task and the touched project that owns it as one write.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::DuplicateTask`] or
    /// [`super::BoardStoreError::ProjectNotFound`]; nothing is stored on
    /// error.
    async fn insert_task_and_touch_project(
        &self,
        task: &Task,
        project: &Project,
    ) -> BoardStoreResult<()>;

    /// Persists changes to one existing task.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &Task) -> BoardStoreResult<()>;

    /// Persists changes to several existing tasks as one write.
    ///
    /// Either every task is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::TaskNotFound`] when any task does not
    /// exist.
    async fn update_tasks(&self, tasks: &[Task]) -> BoardStoreResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> BoardStoreResult<Option<Task>>;

    /// Returns the tasks of one lane ordered by ascending sort key, ties in
    /// insertion order.
    async fn list_lane_tasks(
        &self,
        project_id: ProjectId,
        lane_id: &LaneId,
    ) -> BoardStoreResult<Vec<Task>>;

    /// Returns every task of a project, unordered.
    async fn list_project_tasks(&self, project_id: ProjectId) -> BoardStoreResult<Vec<Task>>;
}
