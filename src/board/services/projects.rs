//! Project creation and read models.

use super::{
    Actor, BoardServiceResult,
    access::{project_lanes, require_membership, require_project},
};
use crate::board::{
    domain::{Membership, Profile, Project, ProjectId, ProjectRole, Task, UserId},
    ports::BoardStore,
};
use crate::lane::domain::{Lane, LaneDraft, default_project_lanes, normalize_lane_drafts};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

const DEFAULT_THEME_COLOR: &str = "#0f766e";

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    theme_color: String,
    lanes: Option<Vec<LaneDraft>>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            theme_color: DEFAULT_THEME_COLOR.to_owned(),
            lanes: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the theme colour.
    #[must_use]
    pub fn with_theme_color(mut self, theme_color: impl Into<String>) -> Self {
        self.theme_color = theme_color.into();
        self
    }

    /// Sets a custom lane configuration.
    #[must_use]
    pub fn with_lanes(mut self, lanes: impl IntoIterator<Item = LaneDraft>) -> Self {
        self.lanes = Some(lanes.into_iter().collect());
        self
    }
}

/// A lane with the number of tasks it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneTaskCount {
    /// The lane.
    pub lane: Lane,
    /// Tasks currently in the lane.
    pub task_count: usize,
}

/// Project card data shown on dashboards and board headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Theme colour.
    pub theme_color: String,
    /// Resolved lanes in display order with task counts.
    pub lanes: Vec<LaneTaskCount>,
    /// Role of the viewing user.
    pub viewer_role: ProjectRole,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Member entry with directory details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    /// Member user.
    pub user_id: UserId,
    /// Member role.
    pub role: ProjectRole,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar URL, when known.
    pub avatar_url: Option<String>,
}

/// Everything needed to render a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Project summary.
    pub project: ProjectSummary,
    /// Members in join order.
    pub members: Vec<MemberView>,
    /// Tasks ordered by lane, then key.
    pub tasks: Vec<Task>,
    /// Whether the viewer may manage members.
    pub can_manage_members: bool,
    /// Whether the viewer may change lanes.
    pub can_manage_lanes: bool,
}

/// Data for the project settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSettingsView {
    /// Project summary.
    pub project: ProjectSummary,
    /// Whether the viewer may change lanes.
    pub can_manage_lanes: bool,
}

/// Project creation and read-model service.
#[derive(Clone)]
pub struct ProjectService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ProjectService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a project owned by the caller.
    ///
    /// Without explicit lanes the default template is stored.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError`] when the caller is anonymous, the
    /// name is blank, the lanes are invalid, or storage fails.
    pub async fn create_project(
        &self,
        actor: Actor,
        request: CreateProjectRequest,
    ) -> BoardServiceResult<Project> {
        let user_id = actor.user_id()?;
        let lanes = match request.lanes.as_deref() {
            Some(drafts) => normalize_lane_drafts(drafts)?,
            None => default_project_lanes(),
        };

        let project = Project::new(
            &request.name,
            &request.description,
            request.theme_color,
            &lanes,
            user_id,
            &*self.clock,
        )?;
        let owner = Membership::new(
            project.id(),
            user_id,
            ProjectRole::Owner,
            user_id,
            &*self.clock,
        );

        self.store.insert_project_with_owner(&project, &owner).await?;
        info!(project_id = %project.id(), lanes = lanes.len(), "project created");
        Ok(project)
    }

    /// Lists every project the caller belongs to, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError`] when the caller is anonymous or
    /// storage fails.
    pub async fn list_projects_for_user(
        &self,
        actor: Actor,
    ) -> BoardServiceResult<Vec<ProjectSummary>> {
        let user_id = actor.user_id()?;
        let memberships = self.store.list_user_memberships(user_id).await?;

        let mut summaries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let Some(project) = self.store.find_project(membership.project_id()).await? else {
                continue;
            };
            let tasks = self.store.list_project_tasks(project.id()).await?;
            summaries.push(summarize(&project, &tasks, membership.role()));
        }
        summaries.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        Ok(summaries)
    }

    /// Returns the board of a project the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotAMember`] when the caller does
    /// not belong to the project, and
    /// [`super::BoardServiceError::ProjectNotFound`] when it does not exist.
    pub async fn get_board(
        &self,
        actor: Actor,
        project_id: ProjectId,
    ) -> BoardServiceResult<BoardView> {
        let user_id = actor.user_id()?;
        let membership = require_membership(&*self.store, project_id, user_id).await?;
        let project = require_project(&*self.store, project_id).await?;

        let lanes = project_lanes(&project);
        let mut tasks = self.store.list_project_tasks(project_id).await?;
        order_board_tasks(&lanes, &mut tasks);

        let member_rows = self.store.list_project_memberships(project_id).await?;
        let mut members = Vec::with_capacity(member_rows.len());
        for member in member_rows {
            let profile = self
                .store
                .find_profile(member.user_id())
                .await?
                .unwrap_or_else(|| Profile::placeholder(member.user_id()));
            members.push(MemberView {
                user_id: member.user_id(),
                role: member.role(),
                email: profile.email().as_str().to_owned(),
                name: profile.name().to_owned(),
                avatar_url: profile.avatar_url().map(ToOwned::to_owned),
            });
        }

        let can_manage = membership.role().can_manage_project();
        Ok(BoardView {
            project: summarize_with_lanes(&project, lanes, &tasks, membership.role()),
            members,
            tasks,
            can_manage_members: can_manage,
            can_manage_lanes: can_manage,
        })
    }

    /// Returns lane configuration and counts for the settings page.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotAMember`] when the caller does
    /// not belong to the project, and
    /// [`super::BoardServiceError::ProjectNotFound`] when it does not exist.
    pub async fn get_project_settings(
        &self,
        actor: Actor,
        project_id: ProjectId,
    ) -> BoardServiceResult<ProjectSettingsView> {
        let user_id = actor.user_id()?;
        let membership = require_membership(&*self.store, project_id, user_id).await?;
        let project = require_project(&*self.store, project_id).await?;
        let tasks = self.store.list_project_tasks(project_id).await?;

        Ok(ProjectSettingsView {
            project: summarize(&project, &tasks, membership.role()),
            can_manage_lanes: membership.role().can_manage_project(),
        })
    }
}

fn summarize(project: &Project, tasks: &[Task], viewer_role: ProjectRole) -> ProjectSummary {
    summarize_with_lanes(project, project_lanes(project), tasks, viewer_role)
}

fn summarize_with_lanes(
    project: &Project,
    lanes: Vec<Lane>,
    tasks: &[Task],
    viewer_role: ProjectRole,
) -> ProjectSummary {
    let lane_counts = lanes
        .into_iter()
        .map(|lane| {
            let task_count = tasks.iter().filter(|task| task.status() == lane.id()).count();
            LaneTaskCount { lane, task_count }
        })
        .collect();

    ProjectSummary {
        id: project.id(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        theme_color: project.theme_color().to_owned(),
        lanes: lane_counts,
        viewer_role,
        updated_at: project.updated_at(),
    }
}

/// Sorts tasks by lane position then key; tasks in unknown lanes go last.
fn order_board_tasks(lanes: &[Lane], tasks: &mut [Task]) {
    tasks.sort_by_key(|task| {
        let lane_position = lanes
            .iter()
            .position(|lane| lane.id() == task.status())
            .unwrap_or(usize::MAX);
        (lane_position, task.sort_order())
    });
}
