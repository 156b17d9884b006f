//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The project name is empty after trimming.
    #[error("project name is required")]
    EmptyProjectName,

    /// The task title is empty after trimming.
    #[error("task title is required")]
    EmptyTaskTitle,

    /// The email address is empty or lacks a local part or domain.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a project role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project role: {0}")]
pub struct ParseProjectRoleError(pub String);
