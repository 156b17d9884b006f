//! Lane configuration changes with removed-lane remapping.

use super::{
    Actor, BoardServiceResult,
    access::{project_lanes, require_manager, require_project},
    tasks::apply_placements,
};
use crate::board::{
    domain::{Project, ProjectId, Task, TaskId, ordering::plan_lane_absorption},
    ports::BoardStore,
};
use crate::lane::domain::{
    LaneDraft, LaneId, LaneMapping, RemapTable, normalize_lane_drafts, removed_lane_ids,
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Tasks from removed lanes bound for one surviving lane.
struct Absorption {
    destination: LaneId,
    batches: Vec<Vec<Task>>,
}

/// Applies lane configuration changes to projects.
///
/// Every check runs before the first write: a rejected change leaves both the
/// project and its tasks untouched.
#[derive(Clone)]
pub struct LaneLifecycleService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> LaneLifecycleService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new lane lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Replaces a project's lanes.
    ///
    /// Removed lanes that still hold tasks need a mapping to a surviving
    /// lane. Their tasks are appended to the destination in their existing
    /// order, removed lanes taken in their current display order, and each
    /// destination is repacked.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Forbidden`] unless the caller is an
    /// owner or admin, lane validation errors for `next_lanes`, and remap
    /// errors for duplicate, missing, or invalid mappings.
    pub async fn update_project_lanes(
        &self,
        actor: Actor,
        project_id: ProjectId,
        next_lanes: &[LaneDraft],
        mappings: &[LaneMapping],
    ) -> BoardServiceResult<Project> {
        let user_id = actor.user_id()?;
        require_manager(
            &*self.store,
            project_id,
            user_id,
            "only project owners or admins can change lanes",
        )
        .await?;
        let mut project = require_project(&*self.store, project_id).await?;

        let current = project_lanes(&project);
        let next = normalize_lane_drafts(next_lanes)?;
        let removed = removed_lane_ids(&current, &next);
        let routes = RemapTable::build(mappings)?;

        let mut absorptions: Vec<Absorption> = Vec::new();
        for lane_id in &removed {
            let tasks = self.store.list_lane_tasks(project_id, lane_id).await?;
            if tasks.is_empty() {
                continue;
            }
            let destination = routes.destination_for(lane_id, &next, &removed)?;
            match absorptions
                .iter_mut()
                .find(|absorption| &absorption.destination == destination)
            {
                Some(absorption) => absorption.batches.push(tasks),
                None => absorptions.push(Absorption {
                    destination: destination.clone(),
                    batches: vec![tasks],
                }),
            }
        }

        let mut writes = Vec::new();
        for absorption in absorptions {
            let existing = self
                .store
                .list_lane_tasks(project_id, &absorption.destination)
                .await?;
            let placements =
                plan_lane_absorption(&absorption.destination, &existing, &absorption.batches);
            let mut loaded: HashMap<TaskId, Task> = existing
                .into_iter()
                .chain(absorption.batches.into_iter().flatten())
                .map(|task| (task.id(), task))
                .collect();
            writes.extend(apply_placements(&mut loaded, &placements, &*self.clock));
        }

        project.replace_lanes(&next, &*self.clock);
        self.store.replace_project_lanes(&project, &writes).await?;

        info!(
            project_id = %project_id,
            lanes = next.len(),
            removed = removed.len(),
            "project lanes replaced"
        );
        debug!(project_id = %project_id, writes = writes.len(), "remapped tasks repacked");
        Ok(project)
    }
}
