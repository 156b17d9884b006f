//! Repository port for project memberships.

use super::BoardStoreResult;
use crate::board::domain::{Membership, ProjectId, UserId};
use async_trait::async_trait;

/// Membership persistence contract.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::DuplicateMembership`] when the user
    /// already belongs to the project.
    async fn insert_membership(&self, membership: &Membership) -> BoardStoreResult<()>;

    /// Persists a role change.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::MembershipNotFound`] when the
    /// membership does not exist.
    async fn update_membership(&self, membership: &Membership) -> BoardStoreResult<()>;

    /// Deletes a membership.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardStoreError::MembershipNotFound`] when the
    /// membership does not exist.
    async fn delete_membership(&self, project_id: ProjectId, user_id: UserId)
    -> BoardStoreResult<()>;

    /// Finds the membership of `user_id` in `project_id`.
    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardStoreResult<Option<Membership>>;

    /// Returns every membership of a project in creation order.
    async fn list_project_memberships(
        &self,
        project_id: ProjectId,
    ) -> BoardStoreResult<Vec<Membership>>;

    /// Returns every membership held by a user.
    async fn list_user_memberships(&self, user_id: UserId) -> BoardStoreResult<Vec<Membership>>;
}
