//! Laneboard: a multi-tenant kanban board engine.
//!
//! Projects own an ordered list of workflow lanes and tasks ordered within
//! each lane by integer sort keys. The crate validates lane configurations,
//! keeps sort keys contiguous as tasks move, and retires lanes by remapping
//! their tasks to surviving lanes.
//!
//! # Architecture
//!
//! Laneboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Authorised operations composed from the above
//!
//! # Modules
//!
//! - [`lane`]: Lane registry, resolution, and remap validation
//! - [`board`]: Projects, memberships, tasks, and their services
//! - [`config`]: Layered runtime settings

pub mod board;
pub mod config;
pub mod lane;
