//! Project aggregate root.

use super::{BoardDomainError, ProjectId, UserId};
use crate::lane::domain::{
    Lane, LaneDraft, LaneResolution, resolve_project_lanes_with_reason,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root owning an ordered lane configuration.
///
/// Lanes are stored as drafts because persisted configuration may predate
/// current validation rules; [`Project::lanes`] always returns a valid list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    theme_color: String,
    lanes: Option<Vec<LaneDraft>>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted theme colour.
    pub theme_color: String,
    /// Persisted lane configuration, if any.
    pub lanes: Option<Vec<LaneDraft>>,
    /// User who created the project.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with a validated lane list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(
        name: &str,
        description: &str,
        theme_color: impl Into<String>,
        lanes: &[Lane],
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(BoardDomainError::EmptyProjectName);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: ProjectId::new(),
            name: trimmed_name.to_owned(),
            description: description.trim().to_owned(),
            theme_color: theme_color.into(),
            lanes: Some(lanes.iter().map(Lane::to_draft).collect()),
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            theme_color: data.theme_color,
            lanes: data.lanes,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the theme colour.
    #[must_use]
    pub fn theme_color(&self) -> &str {
        &self.theme_color
    }

    /// Returns the raw stored lane configuration.
    #[must_use]
    pub fn stored_lanes(&self) -> Option<&[LaneDraft]> {
        self.lanes.as_deref()
    }

    /// Classifies the stored lane configuration.
    #[must_use]
    pub fn lane_resolution(&self) -> LaneResolution {
        resolve_project_lanes_with_reason(self.stored_lanes())
    }

    /// Returns the resolved, always-valid lane list.
    #[must_use]
    pub fn lanes(&self) -> Vec<Lane> {
        self.lane_resolution().into_lanes()
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the lane configuration with an already validated list.
    pub fn replace_lanes(&mut self, lanes: &[Lane], clock: &impl Clock) {
        self.lanes = Some(lanes.iter().map(Lane::to_draft).collect());
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
