//! Thread-safe in-memory implementation of every board port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{EmailAddress, Membership, Profile, Project, ProjectId, Task, TaskId, UserId},
    ports::{
        BoardStoreError, BoardStoreResult, MembershipRepository, ProfileDirectory,
        ProjectRepository, TaskRepository,
    },
};
use crate::lane::domain::LaneId;

/// In-memory board store used by tests and embedders.
///
/// Every method takes the state lock once, so each call is atomic. Task
/// insertion order is recorded and breaks ties between equal sort keys.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    projects: HashMap<ProjectId, Project>,
    memberships: Vec<Membership>,
    tasks: HashMap<TaskId, StoredTask>,
    profiles: HashMap<UserId, Profile>,
    next_sequence: u64,
    task_writes: u64,
}

#[derive(Debug)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many task rows have been updated since creation.
    ///
    /// Inserts are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when the lock is poisoned.
    pub fn task_writes(&self) -> BoardStoreResult<u64> {
        Ok(self.read()?.task_writes)
    }

    fn read(&self) -> BoardStoreResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state
            .read()
            .map_err(|err| BoardStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> BoardStoreResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state
            .write()
            .map_err(|err| BoardStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryBoardState {
    fn ensure_project_absent(&self, id: ProjectId) -> BoardStoreResult<()> {
        if self.projects.contains_key(&id) {
            return Err(BoardStoreError::DuplicateProject(id));
        }
        Ok(())
    }

    fn ensure_project_present(&self, id: ProjectId) -> BoardStoreResult<()> {
        if !self.projects.contains_key(&id) {
            return Err(BoardStoreError::ProjectNotFound(id));
        }
        Ok(())
    }

    fn ensure_membership_absent(&self, membership: &Membership) -> BoardStoreResult<()> {
        let exists = self.memberships.iter().any(|existing| {
            existing.project_id() == membership.project_id()
                && existing.user_id() == membership.user_id()
        });
        if exists {
            return Err(BoardStoreError::DuplicateMembership {
                project_id: membership.project_id(),
                user_id: membership.user_id(),
            });
        }
        Ok(())
    }

    fn ensure_task_absent(&self, id: TaskId) -> BoardStoreResult<()> {
        if self.tasks.contains_key(&id) {
            return Err(BoardStoreError::DuplicateTask(id));
        }
        Ok(())
    }

    fn ensure_tasks_present(&self, tasks: &[Task]) -> BoardStoreResult<()> {
        match tasks.iter().find(|task| !self.tasks.contains_key(&task.id())) {
            Some(missing) => Err(BoardStoreError::TaskNotFound(missing.id())),
            None => Ok(()),
        }
    }

    fn put_task(&mut self, task: &Task) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks.insert(
            task.id(),
            StoredTask {
                sequence,
                task: task.clone(),
            },
        );
    }

    fn overwrite_tasks(&mut self, tasks: &[Task]) {
        for task in tasks {
            if let Some(entry) = self.tasks.get_mut(&task.id()) {
                entry.task = task.clone();
            }
        }
        self.task_writes += u64::try_from(tasks.len()).unwrap_or(u64::MAX);
    }
}

fn ordered_tasks<'a>(tasks: impl Iterator<Item = &'a StoredTask>) -> Vec<Task> {
    let mut stored: Vec<&StoredTask> = tasks.collect();
    stored.sort_by_key(|entry| (entry.task.sort_order(), entry.sequence));
    stored.into_iter().map(|entry| entry.task.clone()).collect()
}

#[async_trait]
impl ProjectRepository for InMemoryBoardStore {
    async fn insert_project_with_owner(
        &self,
        project: &Project,
        owner: &Membership,
    ) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_project_absent(project.id())?;
        state.ensure_membership_absent(owner)?;
        state.projects.insert(project.id(), project.clone());
        state.memberships.push(owner.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_project_present(project.id())?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn replace_project_lanes(
        &self,
        project: &Project,
        remapped: &[Task],
    ) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_project_present(project.id())?;
        state.ensure_tasks_present(remapped)?;
        state.overwrite_tasks(remapped);
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> BoardStoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryBoardStore {
    async fn insert_membership(&self, membership: &Membership) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_membership_absent(membership)?;
        state.memberships.push(membership.clone());
        Ok(())
    }

    async fn update_membership(&self, membership: &Membership) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        let slot = state
            .memberships
            .iter_mut()
            .find(|existing| existing.id() == membership.id())
            .ok_or(BoardStoreError::MembershipNotFound {
                project_id: membership.project_id(),
                user_id: membership.user_id(),
            })?;
        *slot = membership.clone();
        Ok(())
    }

    async fn delete_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        let before = state.memberships.len();
        state.memberships.retain(|existing| {
            existing.project_id() != project_id || existing.user_id() != user_id
        });
        if state.memberships.len() == before {
            return Err(BoardStoreError::MembershipNotFound {
                project_id,
                user_id,
            });
        }
        Ok(())
    }

    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> BoardStoreResult<Option<Membership>> {
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .find(|existing| existing.project_id() == project_id && existing.user_id() == user_id)
            .cloned())
    }

    async fn list_project_memberships(
        &self,
        project_id: ProjectId,
    ) -> BoardStoreResult<Vec<Membership>> {
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .filter(|existing| existing.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn list_user_memberships(&self, user_id: UserId) -> BoardStoreResult<Vec<Membership>> {
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .filter(|existing| existing.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn insert_task(&self, task: &Task) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_task_absent(task.id())?;
        state.put_task(task);
        Ok(())
    }

    async fn insert_task_and_touch_project(
        &self,
        task: &Task,
        project: &Project,
    ) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_task_absent(task.id())?;
        state.ensure_project_present(project.id())?;
        state.put_task(task);
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> BoardStoreResult<()> {
        self.update_tasks(std::slice::from_ref(task)).await
    }

    async fn update_tasks(&self, tasks: &[Task]) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.ensure_tasks_present(tasks)?;
        state.overwrite_tasks(tasks);
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> BoardStoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).map(|entry| entry.task.clone()))
    }

    async fn list_lane_tasks(
        &self,
        project_id: ProjectId,
        lane_id: &LaneId,
    ) -> BoardStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(ordered_tasks(state.tasks.values().filter(|entry| {
            entry.task.project_id() == project_id && entry.task.status() == lane_id
        })))
    }

    async fn list_project_tasks(&self, project_id: ProjectId) -> BoardStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(ordered_tasks(
            state
                .tasks
                .values()
                .filter(|entry| entry.task.project_id() == project_id),
        ))
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryBoardStore {
    async fn upsert_profile(&self, profile: &Profile) -> BoardStoreResult<()> {
        let mut state = self.write()?;
        state.profiles.insert(profile.user_id(), profile.clone());
        Ok(())
    }

    async fn find_profile(&self, user_id: UserId) -> BoardStoreResult<Option<Profile>> {
        Ok(self.read()?.profiles.get(&user_id).cloned())
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> BoardStoreResult<Option<Profile>> {
        let state = self.read()?;
        Ok(state
            .profiles
            .values()
            .find(|profile| profile.email() == email)
            .cloned())
    }

    async fn search_profiles_by_email_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> BoardStoreResult<Vec<Profile>> {
        let state = self.read()?;
        let mut matches: Vec<Profile> = state
            .profiles
            .values()
            .filter(|profile| profile.email().as_str().starts_with(prefix))
            .cloned()
            .collect();
        matches.sort_by(|left, right| left.email().cmp(right.email()));
        matches.truncate(limit);
        Ok(matches)
    }
}
