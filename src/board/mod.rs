//! Projects, memberships, and task ordering for laneboard.
//!
//! This module owns everything that touches storage: project records with
//! their lane configuration, role-based membership, the user directory, and
//! tasks with their per-lane sort keys. The placement engine and the lane
//! lifecycle manager live in [`services`], built on the pure planning
//! functions in [`domain::ordering`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
