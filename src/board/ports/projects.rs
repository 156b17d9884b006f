//! Repository port for projects.

use super::BoardStoreResult;
use crate::board::domain::{Membership, Project, ProjectId, Task};
use async_trait::async_trait;

/// Project persistence contract.
///
/// Operations that write more than one row commit all of them or none.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project together with its owner membership.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::DuplicateProject`] when the
    /// identifier already exists and
    /// [`super::BoardStoreError::DuplicateMembership`] when the owner row
    /// collides. Nothing is stored on error.
    async fn insert_project_with_owner(
        &self,
        project: &Project,
        owner: &Membership,
    ) -> BoardStoreResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update_project(&self, project: &Project) -> BoardStoreResult<()>;

    /// Persists a new lane list together with the tasks moved out of
    /// removed lanes.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::ProjectNotFound`] or
    /// [`super::BoardStoreError::TaskNotFound`] when a row is missing.
    /// Nothing is stored on error.
    async fn replace_project_lanes(
        &self,
        project: &Project,
        remapped: &[Task],
    ) -> BoardStoreResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> BoardStoreResult<Option<Project>>;
}
