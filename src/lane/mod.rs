//! Workflow lane configuration for laneboard projects.
//!
//! Lanes are the columns of a project board. Every project carries the three
//! core lanes (`backlog`, `in_progress`, `done`) plus any number of custom
//! lanes in a user-chosen order. This module is pure: it validates and
//! resolves lane configurations and plans the remapping of removed lanes,
//! leaving persistence to the [`crate::board`] context.
//!
//! - Lane values and identifiers in [`domain`]

pub mod domain;

#[cfg(test)]
mod tests;
