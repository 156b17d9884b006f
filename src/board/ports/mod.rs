//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.
//! Each call is one unit of work; no locking spans calls, so concurrent
//! writers to the same lane resolve as last-write-wins.

pub mod memberships;
pub mod profiles;
pub mod projects;
pub mod store;
pub mod tasks;

pub use memberships::MembershipRepository;
pub use profiles::ProfileDirectory;
pub use projects::ProjectRepository;
pub use store::{BoardStore, BoardStoreError, BoardStoreResult};
pub use tasks::TaskRepository;
