//! Error types for lane configuration validation.

use super::{CoreLane, LaneId};
use thiserror::Error;

/// Errors returned while validating lane identifiers, names, and lists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LaneDomainError {
    /// The candidate lane list is empty.
    #[error("at least one lane is required")]
    EmptyLaneList,

    /// A lane name is empty after trimming.
    #[error("lane name is required")]
    LaneNameRequired,

    /// A lane identifier does not match `^[a-z][a-z0-9_]*$`.
    #[error(
        "lane id '{0}' is invalid: use letters, numbers, and underscore, starting with a letter"
    )]
    InvalidLaneId(String),

    /// The same lane identifier appears more than once.
    #[error("lane id \"{0}\" is duplicated")]
    DuplicateLaneId(String),

    /// The same lane name appears more than once, ignoring case.
    #[error("lane name \"{0}\" is duplicated")]
    DuplicateLaneName(String),

    /// A core lane is absent from the list.
    #[error("lane \"{}\" is required", .0.label())]
    MissingCoreLane(CoreLane),

    /// A core lane carries a name other than its canonical label.
    #[error("lane \"{}\" cannot be renamed", .0.label())]
    CoreLaneRenamed(CoreLane),
}

/// Errors returned while validating removed-lane remappings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LaneRemapError {
    /// The same source lane was mapped more than once.
    #[error("lane \"{0}\" is mapped more than once")]
    DuplicateMapping(LaneId),

    /// A removed lane still holds tasks but no destination was supplied.
    #[error("choose a destination lane for the tasks in \"{0}\"")]
    MissingDestinationMapping(LaneId),

    /// The destination is not a surviving lane.
    #[error("tasks from \"{from}\" cannot be moved to \"{to}\"")]
    InvalidDestination {
        /// Lane being removed.
        from: LaneId,
        /// Requested destination lane.
        to: LaneId,
    },
}
