//! Step definitions for lane lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
