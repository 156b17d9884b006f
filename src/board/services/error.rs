//! Service-level error taxonomy for board operations.

use crate::board::{
    domain::{BoardDomainError, ProjectId, TaskId},
    ports::BoardStoreError,
};
use crate::lane::domain::{LaneDomainError, LaneRemapError};
use thiserror::Error;

/// Errors returned by board services.
///
/// Display strings are short sentences suitable for showing to the user.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// No authenticated identity accompanied the request.
    #[error("you must be authenticated to perform this action")]
    Unauthenticated,

    /// The caller does not belong to the project.
    #[error("you do not have access to this project")]
    NotAMember,

    /// The caller's role does not allow the action.
    #[error("{0}")]
    Forbidden(String),

    /// The change would leave the project without an owner.
    #[error("the last owner cannot be {0}")]
    LastOwner(&'static str),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The target user is not a member of the project.
    #[error("target member does not exist")]
    MemberNotFound,

    /// No registered user matches the email address.
    #[error("no registered user was found for {0}")]
    ProfileNotFound(String),

    /// The user already belongs to the project.
    #[error("this user is already a project member")]
    AlreadyMember,

    /// The lane is not configured for the project.
    #[error("lane \"{0}\" is not configured for this project")]
    InvalidLane(String),

    /// Lane configuration failed validation.
    #[error(transparent)]
    Lane(#[from] LaneDomainError),

    /// Removed-lane mappings failed validation.
    #[error(transparent)]
    Remap(#[from] LaneRemapError),

    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Storage rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

impl BoardServiceError {
    /// Builds a [`BoardServiceError::Forbidden`] from a message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
