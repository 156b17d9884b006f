//! Domain model for lane configuration.
//!
//! The registry holds the immutable core lane set and the default template,
//! the resolver turns stored configuration into a valid ordered lane list, and
//! the remap table validates where tasks from removed lanes should go.

mod error;
mod lane;
mod registry;
mod remap;
mod resolver;

pub use error::{LaneDomainError, LaneRemapError};
pub use lane::{Lane, LaneDraft, LaneId, LaneName};
pub use registry::{
    CORE_LANES, CoreLane, DEFAULT_PROJECT_LANES, TODO_LANE_ID, default_project_lanes,
    to_lane_id_from_name,
};
pub use remap::{LaneMapping, RemapTable, removed_lane_ids};
pub use resolver::{
    LaneResolution, default_task_lane_id, has_lane, normalize_lane_drafts, resolve_project_lanes,
    resolve_project_lanes_with_reason,
};
