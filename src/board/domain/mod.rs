//! Domain model for projects, memberships, profiles, and tasks.
//!
//! Tasks reference lanes from [`crate::lane`] by identifier. Ordering within
//! a lane is planned by the pure functions in [`ordering`]; the services
//! apply the resulting placements through the storage ports.

mod error;
mod ids;
mod membership;
pub mod ordering;
mod profile;
mod project;
mod task;

pub use error::{BoardDomainError, ParseProjectRoleError, ParseTaskPriorityError};
pub use ids::{MembershipId, ProjectId, TaskId, UserId};
pub use membership::{Membership, PersistedMembershipData, ProjectRole};
pub use ordering::{MovePlan, TaskPlacement};
pub use profile::{EmailAddress, Profile, normalize_email};
pub use project::{PersistedProjectData, Project};
pub use task::{NewTaskData, PersistedTaskData, SortOrder, Task, TaskChanges, TaskPriority};
