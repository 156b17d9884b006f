//! Task aggregate, priorities, and sort keys.

use super::{BoardDomainError, ParseTaskPriorityError, ProjectId, TaskId, UserId};
use crate::lane::domain::LaneId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Position key of a task within its lane; lower keys display first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortOrder(i64);

impl SortOrder {
    /// Gap between consecutive keys assigned by appends and repacks.
    pub const STEP: i64 = 1000;

    /// Wraps a raw key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the key for the zero-based `position` in a repacked lane.
    #[must_use]
    pub fn for_position(position: usize) -> Self {
        let slot = i64::try_from(position).unwrap_or(i64::MAX / Self::STEP - 1);
        Self(slot.saturating_add(1).saturating_mul(Self::STEP))
    }

    /// Returns the key one step after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(Self::STEP))
    }

    /// Returns the raw key.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated content for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning project.
    pub project_id: ProjectId,
    /// Raw title; trimmed and required.
    pub title: String,
    /// Raw description; trimmed.
    pub description: String,
    /// Lane the task starts in.
    pub status: LaneId,
    /// Task priority.
    pub priority: TaskPriority,
    /// Assigned project member.
    pub assignee_id: UserId,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Raw tags; trimmed, blanks dropped.
    pub tags: Vec<String>,
    /// Estimate in points.
    pub estimate_points: u32,
    /// Initial sort key within the lane.
    pub sort_order: SortOrder,
}

/// Field edits applied to an existing task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New assignee, already checked for project membership.
    pub assignee_id: Option<UserId>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New tags.
    pub tags: Option<Vec<String>>,
    /// New estimate.
    pub estimate_points: Option<u32>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    status: LaneId,
    priority: TaskPriority,
    assignee_id: UserId,
    due_date: Option<NaiveDate>,
    tags: Vec<String>,
    estimate_points: u32,
    sort_order: SortOrder,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted lane identifier.
    pub status: LaneId,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted estimate.
    pub estimate_points: u32,
    /// Persisted sort key.
    pub sort_order: SortOrder,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let title = normalize_title(&data.title)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            project_id: data.project_id,
            title,
            description: data.description.trim().to_owned(),
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            tags: normalize_tags(data.tags),
            estimate_points: data.estimate_points,
            sort_order: data.sort_order,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            tags: data.tags,
            estimate_points: data.estimate_points,
            sort_order: data.sort_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the identifier of the lane holding the task.
    #[must_use]
    pub const fn status(&self) -> &LaneId {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the estimate in points.
    #[must_use]
    pub const fn estimate_points(&self) -> u32 {
        self.estimate_points
    }

    /// Returns the sort key within the lane.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
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

    /// Places the task in `status` at `sort_order` and bumps `updated_at`.
    pub fn relocate(&mut self, status: LaneId, sort_order: SortOrder, clock: &impl Clock) {
        self.status = status;
        self.sort_order = sort_order;
        self.touch(clock);
    }

    /// Applies field edits and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when a new title is blank;
    /// the task is left unchanged in that case.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let title = changes
            .title
            .as_deref()
            .map(normalize_title)
            .transpose()?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = changes.description {
            self.description = value.trim().to_owned();
        }
        if let Some(value) = changes.priority {
            self.priority = value;
        }
        if let Some(value) = changes.assignee_id {
            self.assignee_id = value;
        }
        if let Some(value) = changes.due_date {
            self.due_date = value;
        }
        if let Some(value) = changes.tags {
            self.tags = normalize_tags(value);
        }
        if let Some(value) = changes.estimate_points {
            self.estimate_points = value;
        }
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(raw: &str) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}
