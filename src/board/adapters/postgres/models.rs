//! Diesel row models for board persistence.

use super::schema::{profiles, project_members, projects, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Project row used for reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Theme colour.
    pub theme_color: String,
    /// Lane drafts as JSON.
    pub lanes: Option<Value>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Membership row used for reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    /// Membership identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Member user.
    pub user_id: uuid::Uuid,
    /// Member role.
    pub role: String,
    /// User who added the member.
    pub added_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Task query row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lane identifier.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tags.
    pub tags: Vec<String>,
    /// Estimate in points.
    pub estimate_points: i32,
    /// Sort key.
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task insert and update model.
///
/// The insertion sequence column is filled by the database.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lane identifier.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tags.
    pub tags: Vec<String>,
    /// Estimate in points.
    pub estimate_points: i32,
    /// Sort key.
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Profile row used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProfileRow {
    /// User identifier.
    pub user_id: uuid::Uuid,
    /// Normalised email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
}
