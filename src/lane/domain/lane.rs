//! Lane identifier, name, and value types.

use super::LaneDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated lane identifier matching `^[a-z][a-z0-9_]*$`.
///
/// Tasks reference their lane through this identifier, so it is stable for
/// the lifetime of the lane even when the display name changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LaneId(String);

impl LaneId {
    /// Creates a validated lane identifier without normalising it.
    ///
    /// # Errors
    ///
    /// Returns [`LaneDomainError::InvalidLaneId`] when the value does not
    /// match `^[a-z][a-z0-9_]*$`.
    pub fn new(value: impl Into<String>) -> Result<Self, LaneDomainError> {
        let raw = value.into();
        if !matches_lane_id_pattern(&raw) {
            return Err(LaneDomainError::InvalidLaneId(raw));
        }
        Ok(Self(raw))
    }

    /// Wraps a registry constant that is known to satisfy the pattern.
    pub(super) fn from_static(value: &'static str) -> Self {
        debug_assert!(matches_lane_id_pattern(value), "invalid registry lane id");
        Self(value.to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LaneId {
    type Error = LaneDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LaneId> for String {
    fn from(value: LaneId) -> Self {
        value.0
    }
}

impl AsRef<str> for LaneId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for LaneId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LaneId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name of a lane with whitespace trimmed and collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LaneName(String);

impl LaneName {
    /// Creates a lane name, trimming and collapsing internal whitespace runs.
    ///
    /// # Errors
    ///
    /// Returns [`LaneDomainError::LaneNameRequired`] when nothing remains
    /// after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, LaneDomainError> {
        let sanitized = value.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if sanitized.is_empty() {
            return Err(LaneDomainError::LaneNameRequired);
        }
        Ok(Self(sanitized))
    }

    pub(super) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LaneName {
    type Error = LaneDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LaneName> for String {
    fn from(value: LaneName) -> Self {
        value.0
    }
}

impl fmt::Display for LaneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated workflow lane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    id: LaneId,
    name: LaneName,
}

impl Lane {
    /// Creates a lane from validated parts.
    #[must_use]
    pub const fn new(id: LaneId, name: LaneName) -> Self {
        Self { id, name }
    }

    /// Returns the lane identifier.
    #[must_use]
    pub const fn id(&self) -> &LaneId {
        &self.id
    }

    /// Returns the lane display name.
    #[must_use]
    pub const fn name(&self) -> &LaneName {
        &self.name
    }

    /// Converts the lane back into its stored draft form.
    #[must_use]
    pub fn to_draft(&self) -> LaneDraft {
        LaneDraft::new(Some(self.id.as_str()), self.name.as_str())
    }
}

/// Unvalidated lane as supplied by a caller or read from storage.
///
/// An absent or empty `id` means the identifier is derived from `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneDraft {
    /// Requested identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Requested display name.
    pub name: String,
}

impl LaneDraft {
    /// Creates a lane draft.
    #[must_use]
    pub fn new(id: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            id: id.map(str::to_owned),
            name: name.into(),
        }
    }

    /// Creates a draft whose identifier is derived from its name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

pub(super) fn matches_lane_id_pattern(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
