//! Destination mapping for lanes removed by a configuration change.

use super::{Lane, LaneDomainError, LaneId, LaneRemapError, has_lane};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied instruction to move the tasks of a removed lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneMapping {
    /// Lane being removed.
    pub from_lane_id: LaneId,
    /// Surviving lane that receives the tasks.
    pub to_lane_id: LaneId,
}

impl LaneMapping {
    /// Creates a mapping from validated lane identifiers.
    #[must_use]
    pub const fn new(from_lane_id: LaneId, to_lane_id: LaneId) -> Self {
        Self {
            from_lane_id,
            to_lane_id,
        }
    }

    /// Parses a mapping from raw lane identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`LaneDomainError::InvalidLaneId`] when either identifier is
    /// malformed.
    pub fn parse(from_lane_id: &str, to_lane_id: &str) -> Result<Self, LaneDomainError> {
        Ok(Self::new(LaneId::new(from_lane_id)?, LaneId::new(to_lane_id)?))
    }
}

/// Returns identifiers present in `current` but absent from `next`, in
/// `current` order.
#[must_use]
pub fn removed_lane_ids(current: &[Lane], next: &[Lane]) -> Vec<LaneId> {
    current
        .iter()
        .filter(|lane| !has_lane(next, lane.id().as_str()))
        .map(|lane| lane.id().clone())
        .collect()
}

/// Lookup table from removed lane to destination lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    routes: HashMap<LaneId, LaneId>,
}

impl RemapTable {
    /// Builds the table from caller-supplied mappings.
    ///
    /// # Errors
    ///
    /// Returns [`LaneRemapError::DuplicateMapping`] when a source lane appears
    /// more than once.
    pub fn build(mappings: &[LaneMapping]) -> Result<Self, LaneRemapError> {
        let mut routes = HashMap::with_capacity(mappings.len());
        for mapping in mappings {
            if routes
                .insert(mapping.from_lane_id.clone(), mapping.to_lane_id.clone())
                .is_some()
            {
                return Err(LaneRemapError::DuplicateMapping(
                    mapping.from_lane_id.clone(),
                ));
            }
        }
        Ok(Self { routes })
    }

    /// Returns the validated destination for a removed lane that holds tasks.
    ///
    /// # Errors
    ///
    /// Returns [`LaneRemapError::MissingDestinationMapping`] when no mapping
    /// exists for `removed`, and [`LaneRemapError::InvalidDestination`] when
    /// the destination is not in `next_lanes` or is itself being removed.
    pub fn destination_for(
        &self,
        removed: &LaneId,
        next_lanes: &[Lane],
        removed_ids: &[LaneId],
    ) -> Result<&LaneId, LaneRemapError> {
        let destination = self
            .routes
            .get(removed)
            .ok_or_else(|| LaneRemapError::MissingDestinationMapping(removed.clone()))?;

        if !has_lane(next_lanes, destination.as_str()) || removed_ids.contains(destination) {
            return Err(LaneRemapError::InvalidDestination {
                from: removed.clone(),
                to: destination.clone(),
            });
        }
        Ok(destination)
    }
}
