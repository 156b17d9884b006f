//! `PostgreSQL` implementation of every board port.

use super::{
    models::{MembershipRow, ProfileRow, ProjectRow, TaskRecord, TaskRow},
    schema::{profiles, project_members, projects, tasks},
};
use crate::board::{
    domain::{
        EmailAddress, Membership, MembershipId, PersistedMembershipData, PersistedProjectData,
        PersistedTaskData, Profile, Project, ProjectId, ProjectRole, SortOrder, Task, TaskId,
        TaskPriority, UserId,
    },
    ports::{
        BoardStoreError, BoardStoreResult, MembershipRepository, ProfileDirectory,
        ProjectRepository, TaskRepository,
    },
};
use crate::lane::domain::{LaneDraft, LaneId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `database_url` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when the pool cannot be built.
    pub fn connect(database_url: &str, max_size: u32) -> BoardStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(BoardStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &BoardPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardStoreError::persistence)?
    }
}

impl From<DieselError> for BoardStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

const fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

fn insert_project_row(
    connection: &mut PgConnection,
    project_id: ProjectId,
    row: &ProjectRow,
) -> BoardStoreResult<()> {
    diesel::insert_into(projects::table)
        .values(row)
        .execute(connection)
        .map_err(|err| {
            if is_unique_violation(&err) {
                BoardStoreError::DuplicateProject(project_id)
            } else {
                BoardStoreError::persistence(err)
            }
        })?;
    Ok(())
}

fn update_project_row(
    connection: &mut PgConnection,
    project_id: ProjectId,
    row: &ProjectRow,
) -> BoardStoreResult<()> {
    let updated = diesel::update(projects::table.find(project_id.into_inner()))
        .set(row)
        .execute(connection)?;
    if updated == 0 {
        return Err(BoardStoreError::ProjectNotFound(project_id));
    }
    Ok(())
}

fn insert_membership_row(
    connection: &mut PgConnection,
    row: &MembershipRow,
) -> BoardStoreResult<()> {
    diesel::insert_into(project_members::table)
        .values(row)
        .execute(connection)
        .map_err(|err| {
            if is_unique_violation(&err) {
                BoardStoreError::DuplicateMembership {
                    project_id: ProjectId::from_uuid(row.project_id),
                    user_id: UserId::from_uuid(row.user_id),
                }
            } else {
                BoardStoreError::persistence(err)
            }
        })?;
    Ok(())
}

fn insert_task_record(
    connection: &mut PgConnection,
    record: &TaskRecord,
) -> BoardStoreResult<()> {
    diesel::insert_into(tasks::table)
        .values(record)
        .execute(connection)
        .map_err(|err| {
            if is_unique_violation(&err) {
                BoardStoreError::DuplicateTask(TaskId::from_uuid(record.id))
            } else {
                BoardStoreError::persistence(err)
            }
        })?;
    Ok(())
}

fn update_task_records(
    connection: &mut PgConnection,
    records: &[TaskRecord],
) -> BoardStoreResult<()> {
    for record in records {
        let updated = diesel::update(tasks::table.find(record.id))
            .set(record)
            .execute(connection)?;
        if updated == 0 {
            return Err(BoardStoreError::TaskNotFound(TaskId::from_uuid(record.id)));
        }
    }
    Ok(())
}

#[async_trait]
impl ProjectRepository for PostgresBoardStore {
    async fn insert_project_with_owner(
        &self,
        project: &Project,
        owner: &Membership,
    ) -> BoardStoreResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        let owner_row = to_membership_row(owner);
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardStoreError, _>(|tx| {
                insert_project_row(tx, project_id, &row)?;
                insert_membership_row(tx, &owner_row)
            })
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> BoardStoreResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        self.run_blocking(move |connection| update_project_row(connection, project_id, &row))
            .await
    }

    async fn replace_project_lanes(
        &self,
        project: &Project,
        remapped: &[Task],
    ) -> BoardStoreResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        let records = remapped
            .iter()
            .map(to_task_record)
            .collect::<BoardStoreResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardStoreError, _>(|tx| {
                update_task_records(tx, &records)?;
                update_project_row(tx, project_id, &row)
            })
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> BoardStoreResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }
}

#[async_trait]
impl MembershipRepository for PostgresBoardStore {
    async fn insert_membership(&self, membership: &Membership) -> BoardStoreResult<()> {
        let row = to_membership_row(membership);
        self.run_blocking(move |connection| insert_membership_row(connection, &row))
            .await
    }

    async fn update_membership(&self, membership: &Membership) -> BoardStoreResult<()> {
        let project_id = membership.project_id();
        let user_id = membership.user_id();
        let membership_id = membership.id().into_inner();
        let role = membership.role().as_str();
        self.run_blocking(move |connection| {
            let updated = diesel::update(project_members::table.find(membership_id))
                .set(project_members::role.eq(role))
                .execute(connection)
                .map_err(BoardStoreError::persistence)?;
            if updated == 0 {
                return Err(BoardStoreError::MembershipNotFound {
                    project_id,
                    user_id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn delete_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.into_inner()))
                    .filter(project_members::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(BoardStoreError::persistence)?;
            if deleted == 0 {
                return Err(BoardStoreError::MembershipNotFound {
                    project_id,
                    user_id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardStoreResult<Option<Membership>> {
        self.run_blocking(move |connection| {
            let row = project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .select(MembershipRow::as_select())
                .first::<MembershipRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_membership).transpose()
        })
        .await
    }

    async fn list_project_memberships(
        &self,
        project_id: ProjectId,
    ) -> BoardStoreResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            project_members::table
                .filter(project_members::project_id.eq(project_id.into_inner()))
                .order((project_members::created_at.asc(), project_members::id.asc()))
                .select(MembershipRow::as_select())
                .load::<MembershipRow>(connection)
                .map_err(BoardStoreError::persistence)?
                .into_iter()
                .map(row_to_membership)
                .collect()
        })
        .await
    }

    async fn list_user_memberships(&self, user_id: UserId) -> BoardStoreResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            project_members::table
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .select(MembershipRow::as_select())
                .load::<MembershipRow>(connection)
                .map_err(BoardStoreError::persistence)?
                .into_iter()
                .map(row_to_membership)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn insert_task(&self, task: &Task) -> BoardStoreResult<()> {
        let record = to_task_record(task)?;
        self.run_blocking(move |connection| insert_task_record(connection, &record))
            .await
    }

    async fn insert_task_and_touch_project(
        &self,
        task: &Task,
        project: &Project,
    ) -> BoardStoreResult<()> {
        let project_id = project.id();
        let record = to_task_record(task)?;
        let row = to_project_row(project)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardStoreError, _>(|tx| {
                insert_task_record(tx, &record)?;
                update_project_row(tx, project_id, &row)
            })
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> BoardStoreResult<()> {
        self.update_tasks(std::slice::from_ref(task)).await
    }

    async fn update_tasks(&self, tasks_to_write: &[Task]) -> BoardStoreResult<()> {
        let records = tasks_to_write
            .iter()
            .map(to_task_record)
            .collect::<BoardStoreResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardStoreError, _>(|tx| update_task_records(tx, &records))
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_lane_tasks(
        &self,
        project_id: ProjectId,
        lane_id: &LaneId,
    ) -> BoardStoreResult<Vec<Task>> {
        let lane = lane_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::status.eq(lane))
                .order((tasks::sort_order.asc(), tasks::seq.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardStoreError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn list_project_tasks(&self, project_id: ProjectId) -> BoardStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::sort_order.asc(), tasks::seq.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardStoreError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ProfileDirectory for PostgresBoardStore {
    async fn upsert_profile(&self, profile: &Profile) -> BoardStoreResult<()> {
        let row = ProfileRow {
            user_id: profile.user_id().into_inner(),
            email: profile.email().as_str().to_owned(),
            name: profile.name().to_owned(),
            avatar_url: profile.avatar_url().map(ToOwned::to_owned),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .on_conflict(profiles::user_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(BoardStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_profile(&self, user_id: UserId) -> BoardStoreResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .find(user_id.into_inner())
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> BoardStoreResult<Option<Profile>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::email.eq(lookup))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn search_profiles_by_email_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> BoardStoreResult<Vec<Profile>> {
        let pattern = format!("{}%", escape_like(prefix));
        let row_limit = i64::try_from(limit).map_err(BoardStoreError::persistence)?;
        self.run_blocking(move |connection| {
            profiles::table
                .filter(profiles::email.like(pattern).escape('\\'))
                .order(profiles::email.asc())
                .limit(row_limit)
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(BoardStoreError::persistence)?
                .into_iter()
                .map(row_to_profile)
                .collect()
        })
        .await
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_project_row(project: &Project) -> BoardStoreResult<ProjectRow> {
    let lanes = project
        .stored_lanes()
        .map(serde_json::to_value)
        .transpose()
        .map_err(BoardStoreError::persistence)?;
    Ok(ProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        theme_color: project.theme_color().to_owned(),
        lanes,
        created_by: project.created_by().into_inner(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    })
}

fn row_to_project(row: ProjectRow) -> BoardStoreResult<Project> {
    let lanes = row
        .lanes
        .map(serde_json::from_value::<Vec<LaneDraft>>)
        .transpose()
        .map_err(BoardStoreError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        theme_color: row.theme_color,
        lanes,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_membership_row(membership: &Membership) -> MembershipRow {
    MembershipRow {
        id: membership.id().into_inner(),
        project_id: membership.project_id().into_inner(),
        user_id: membership.user_id().into_inner(),
        role: membership.role().as_str().to_owned(),
        added_by: membership.added_by().into_inner(),
        created_at: membership.created_at(),
    }
}

fn row_to_membership(row: MembershipRow) -> BoardStoreResult<Membership> {
    let role = ProjectRole::try_from(row.role.as_str()).map_err(BoardStoreError::persistence)?;
    Ok(Membership::from_persisted(PersistedMembershipData {
        id: MembershipId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        user_id: UserId::from_uuid(row.user_id),
        role,
        added_by: UserId::from_uuid(row.added_by),
        created_at: row.created_at,
    }))
}

fn to_task_record(task: &Task) -> BoardStoreResult<TaskRecord> {
    let estimate_points =
        i32::try_from(task.estimate_points()).map_err(BoardStoreError::persistence)?;
    Ok(TaskRecord {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assignee_id: task.assignee_id().into_inner(),
        due_date: task.due_date(),
        tags: task.tags().to_vec(),
        estimate_points,
        sort_order: task.sort_order().value(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> BoardStoreResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        assignee_id,
        due_date,
        tags,
        estimate_points: persisted_estimate,
        sort_order,
        created_at,
        updated_at,
    } = row;

    let status = LaneId::new(persisted_status).map_err(BoardStoreError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(BoardStoreError::persistence)?;
    let estimate_points =
        u32::try_from(persisted_estimate).map_err(BoardStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title,
        description,
        status,
        priority,
        assignee_id: UserId::from_uuid(assignee_id),
        due_date,
        tags,
        estimate_points,
        sort_order: SortOrder::new(sort_order),
        created_at,
        updated_at,
    }))
}

fn row_to_profile(row: ProfileRow) -> BoardStoreResult<Profile> {
    let email = EmailAddress::new(&row.email).map_err(BoardStoreError::persistence)?;
    Ok(Profile::new(
        UserId::from_uuid(row.user_id),
        email,
        Some(&row.name),
        row.avatar_url,
    ))
}
