//! Shared error type and composite store contract.

use super::{MembershipRepository, ProfileDirectory, ProjectRepository, TaskRepository};
use crate::board::domain::{ProjectId, TaskId, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board storage operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Everything the board services need from storage.
pub trait BoardStore:
    ProjectRepository + MembershipRepository + TaskRepository + ProfileDirectory
{
}

impl<T> BoardStore for T where
    T: ProjectRepository + MembershipRepository + TaskRepository + ProfileDirectory
{
}

/// Errors returned by board storage implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The user already has a membership in the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    DuplicateMembership {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The membership was not found.
    #[error("user {user_id} is not a member of project {project_id}")]
    MembershipNotFound {
        /// Project identifier.
        project_id: ProjectId,
        /// User identifier.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
