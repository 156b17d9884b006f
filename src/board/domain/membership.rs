//! Project membership and roles.

use super::{MembershipId, ParseProjectRoleError, ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Full control, including managing other owners.
    Owner,
    /// Manages members and lanes, but not owners.
    Admin,
    /// Works with tasks only.
    #[default]
    Member,
}

impl ProjectRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns whether the role may manage members and lanes.
    #[must_use]
    pub const fn can_manage_project(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectRole {
    type Error = ParseProjectRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseProjectRoleError(value.to_owned())),
        }
    }
}

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    project_id: ProjectId,
    user_id: UserId,
    role: ProjectRole,
    added_by: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMembershipData {
    /// Persisted membership identifier.
    pub id: MembershipId,
    /// Project the membership belongs to.
    pub project_id: ProjectId,
    /// Member user.
    pub user_id: UserId,
    /// Member role.
    pub role: ProjectRole,
    /// User who added the member.
    pub added_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new membership.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
        added_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: MembershipId::new(),
            project_id,
            user_id,
            role,
            added_by,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedMembershipData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            user_id: data.user_id,
            role: data.role,
            added_by: data.added_by,
            created_at: data.created_at,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub const fn id(&self) -> MembershipId {
        self.id
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member role.
    #[must_use]
    pub const fn role(&self) -> ProjectRole {
        self.role
    }

    /// Returns the user who added the member.
    #[must_use]
    pub const fn added_by(&self) -> UserId {
        self.added_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Changes the member role.
    pub const fn set_role(&mut self, role: ProjectRole) {
        self.role = role;
    }
}
