//! Core lane set, default lane template, and lane id derivation.

use super::lane::matches_lane_id_pattern;
use super::{Lane, LaneDomainError, LaneId, LaneName};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Identifier of the optional `To Do` lane preferred for new tasks.
pub const TODO_LANE_ID: &str = "todo";

/// A lane every project must contain with its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreLane {
    /// Unscheduled work.
    Backlog,
    /// Work being carried out.
    InProgress,
    /// Finished work.
    Done,
}

impl CoreLane {
    /// Returns the lane identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns the canonical display name, which can never change.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Returns the identifier as a [`LaneId`].
    #[must_use]
    pub fn lane_id(self) -> LaneId {
        LaneId::from_static(self.id())
    }

    /// Looks up the core lane with the given identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        CORE_LANES.into_iter().find(|lane| lane.id() == id)
    }
}

/// Lanes that must be present in every project.
pub const CORE_LANES: [CoreLane; 3] = [CoreLane::Backlog, CoreLane::InProgress, CoreLane::Done];

/// Template used whenever a project has no valid lane configuration.
pub const DEFAULT_PROJECT_LANES: [(&str, &str); 5] = [
    ("backlog", "Backlog"),
    (TODO_LANE_ID, "To Do"),
    ("in_progress", "In Progress"),
    ("review", "Review"),
    ("done", "Done"),
];

static DEFAULT_LANES: LazyLock<Vec<Lane>> = LazyLock::new(|| {
    DEFAULT_PROJECT_LANES
        .iter()
        .map(|&(id, name)| Lane::new(LaneId::from_static(id), LaneName::from_static(name)))
        .collect()
});

/// Returns a fresh copy of the five-lane default template.
#[must_use]
pub fn default_project_lanes() -> Vec<Lane> {
    DEFAULT_LANES.clone()
}

/// Derives a lane identifier from a display name.
///
/// The name is trimmed and lowercased, whitespace and hyphen runs become a
/// single underscore, characters outside `[a-z0-9_]` are dropped, and repeated
/// underscores are collapsed. `"QA Ready!"` becomes `"qa_ready"`.
///
/// # Errors
///
/// Returns [`LaneDomainError::InvalidLaneId`] when the derived value is empty
/// or does not start with a letter.
pub fn to_lane_id_from_name(name: &str) -> Result<LaneId, LaneDomainError> {
    let normalized = normalize_lane_id(name);
    if !matches_lane_id_pattern(&normalized) {
        return Err(LaneDomainError::InvalidLaneId(name.to_owned()));
    }
    LaneId::new(normalized)
}

pub(super) fn normalize_lane_id(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut separated = String::with_capacity(lowered.len());
    let mut in_separator_run = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator_run {
                separated.push('_');
            }
            in_separator_run = true;
        } else {
            in_separator_run = false;
            separated.push(ch);
        }
    }

    let mut normalized = String::with_capacity(separated.len());
    for ch in separated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
    {
        if ch == '_' && normalized.ends_with('_') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}
