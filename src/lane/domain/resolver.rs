//! Validation of candidate lane lists and resolution of stored configuration.

use super::registry::normalize_lane_id;
use super::{
    CORE_LANES, CoreLane, Lane, LaneDomainError, LaneDraft, LaneId, LaneName, TODO_LANE_ID,
    default_project_lanes,
};
use std::collections::HashSet;

/// Validates and canonicalises a candidate lane list.
///
/// Names are trimmed with inner whitespace collapsed; identifiers are taken
/// from the draft when present and derived from the name otherwise, then
/// normalised. Input order is preserved.
///
/// # Errors
///
/// Returns [`LaneDomainError::EmptyLaneList`] for an empty list,
/// [`LaneDomainError::LaneNameRequired`] or [`LaneDomainError::InvalidLaneId`]
/// for a malformed draft, [`LaneDomainError::DuplicateLaneId`] or
/// [`LaneDomainError::DuplicateLaneName`] for repeats, and
/// [`LaneDomainError::MissingCoreLane`] or [`LaneDomainError::CoreLaneRenamed`]
/// when a core lane is absent or renamed.
pub fn normalize_lane_drafts(drafts: &[LaneDraft]) -> Result<Vec<Lane>, LaneDomainError> {
    if drafts.is_empty() {
        return Err(LaneDomainError::EmptyLaneList);
    }

    let lanes = drafts
        .iter()
        .map(normalize_draft)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen_ids = HashSet::with_capacity(lanes.len());
    let mut seen_names = HashSet::with_capacity(lanes.len());
    for lane in &lanes {
        if !seen_ids.insert(lane.id().as_str()) {
            return Err(LaneDomainError::DuplicateLaneId(lane.id().to_string()));
        }
        if !seen_names.insert(lane.name().as_str().to_lowercase()) {
            return Err(LaneDomainError::DuplicateLaneName(lane.name().to_string()));
        }
    }

    for core in CORE_LANES {
        let found = lanes
            .iter()
            .find(|lane| lane.id() == core.id())
            .ok_or(LaneDomainError::MissingCoreLane(core))?;
        if found.name().as_str() != core.label() {
            return Err(LaneDomainError::CoreLaneRenamed(core));
        }
    }

    Ok(lanes)
}

fn normalize_draft(draft: &LaneDraft) -> Result<Lane, LaneDomainError> {
    let name = LaneName::new(&draft.name)?;
    let raw_id = match draft.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => name.as_str(),
    };
    let id = LaneId::new(normalize_lane_id(raw_id))
        .map_err(|_| LaneDomainError::InvalidLaneId(raw_id.to_owned()))?;
    Ok(Lane::new(id, name))
}

/// Outcome of resolving a project's stored lane configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneResolution {
    /// The stored configuration is valid.
    Stored(Vec<Lane>),
    /// Nothing is stored; the default template applies.
    Unconfigured,
    /// The stored configuration is invalid; the default template applies.
    Invalid(LaneDomainError),
}

impl LaneResolution {
    /// Returns the validation failure that triggered the fallback, if any.
    #[must_use]
    pub const fn fallback_reason(&self) -> Option<&LaneDomainError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Stored(_) | Self::Unconfigured => None,
        }
    }

    /// Returns the resolved lanes, substituting the default template when the
    /// stored configuration is absent or invalid.
    #[must_use]
    pub fn into_lanes(self) -> Vec<Lane> {
        match self {
            Self::Stored(lanes) => lanes,
            Self::Unconfigured | Self::Invalid(_) => default_project_lanes(),
        }
    }
}

/// Classifies stored lane configuration without discarding the reason for a
/// fallback.
#[must_use]
pub fn resolve_project_lanes_with_reason(stored: Option<&[LaneDraft]>) -> LaneResolution {
    match stored {
        None | Some([]) => LaneResolution::Unconfigured,
        Some(drafts) => match normalize_lane_drafts(drafts) {
            Ok(lanes) => LaneResolution::Stored(lanes),
            Err(err) => LaneResolution::Invalid(err),
        },
    }
}

/// Resolves stored lane configuration into a valid ordered lane list.
///
/// Never fails: absent, empty, or invalid configuration yields the default
/// template.
#[must_use]
pub fn resolve_project_lanes(stored: Option<&[LaneDraft]>) -> Vec<Lane> {
    resolve_project_lanes_with_reason(stored).into_lanes()
}

/// Returns whether `lanes` contains a lane with identifier `id`.
#[must_use]
pub fn has_lane(lanes: &[Lane], id: &str) -> bool {
    lanes.iter().any(|lane| lane.id() == id)
}

/// Returns the lane new tasks land in: `todo` when configured, else `backlog`.
#[must_use]
pub fn default_task_lane_id(lanes: &[Lane]) -> LaneId {
    lanes
        .iter()
        .find(|lane| lane.id() == TODO_LANE_ID)
        .map_or_else(|| CoreLane::Backlog.lane_id(), |lane| lane.id().clone())
}
