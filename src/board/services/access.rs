//! Identity and membership checks shared by board services.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{Membership, Project, ProjectId, UserId},
    ports::BoardStore,
};
use crate::lane::domain::{Lane, LaneId, has_lane};
use tracing::warn;

/// Identity supplied by the authentication collaborator for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// No authenticated session.
    Anonymous,
    /// An authenticated user.
    User(UserId),
}

impl Actor {
    /// Returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthenticated`] for anonymous callers.
    pub const fn user_id(self) -> BoardServiceResult<UserId> {
        match self {
            Self::User(user_id) => Ok(user_id),
            Self::Anonymous => Err(BoardServiceError::Unauthenticated),
        }
    }
}

impl From<UserId> for Actor {
    fn from(user_id: UserId) -> Self {
        Self::User(user_id)
    }
}

impl From<Option<UserId>> for Actor {
    fn from(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Anonymous, Self::User)
    }
}

pub(super) async fn require_membership<S: BoardStore>(
    store: &S,
    project_id: ProjectId,
    user_id: UserId,
) -> BoardServiceResult<Membership> {
    store
        .find_membership(project_id, user_id)
        .await?
        .ok_or(BoardServiceError::NotAMember)
}

pub(super) async fn require_project<S: BoardStore>(
    store: &S,
    project_id: ProjectId,
) -> BoardServiceResult<Project> {
    store
        .find_project(project_id)
        .await?
        .ok_or(BoardServiceError::ProjectNotFound(project_id))
}

/// Loads the caller's membership and checks it may manage the project.
pub(super) async fn require_manager<S: BoardStore>(
    store: &S,
    project_id: ProjectId,
    user_id: UserId,
    denied: &str,
) -> BoardServiceResult<Membership> {
    let membership = store
        .find_membership(project_id, user_id)
        .await?
        .filter(|membership| membership.role().can_manage_project())
        .ok_or_else(|| BoardServiceError::forbidden(denied))?;
    Ok(membership)
}

/// Resolves a project's lanes, logging when stored configuration is rejected.
pub(super) fn project_lanes(project: &Project) -> Vec<Lane> {
    let resolution = project.lane_resolution();
    if let Some(reason) = resolution.fallback_reason() {
        warn!(
            project_id = %project.id(),
            error = %reason,
            "stored lane configuration is invalid, using default lanes"
        );
    }
    resolution.into_lanes()
}

/// Parses `raw` and checks it names one of `lanes`.
pub(super) fn require_lane(lanes: &[Lane], raw: &str) -> BoardServiceResult<LaneId> {
    if !has_lane(lanes, raw) {
        return Err(BoardServiceError::InvalidLane(raw.to_owned()));
    }
    LaneId::new(raw).map_err(|_| BoardServiceError::InvalidLane(raw.to_owned()))
}
