//! Application services for board operations.
//!
//! Services authorise the caller, validate input against the project's
//! resolved lanes, and only then write through the store.

mod access;
mod error;
mod lanes;
mod members;
mod projects;
mod tasks;

pub use access::Actor;
pub use error::{BoardServiceError, BoardServiceResult};
pub use lanes::LaneLifecycleService;
pub use members::MembershipService;
pub use projects::{
    BoardView, CreateProjectRequest, LaneTaskCount, MemberView, ProjectService,
    ProjectSettingsView, ProjectSummary,
};
pub use tasks::{CreateTaskRequest, TaskService, UpdateTaskRequest};
