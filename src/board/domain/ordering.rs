//! Sort-key allocation and task placement planning.
//!
//! Lanes are kept ordered by rewriting every affected key rather than by
//! inserting between neighbours: a repack assigns `(position + 1) * 1000` to
//! each task in display order. Planning functions are pure and return the
//! [`TaskPlacement`]s that must be written; tasks whose lane and key are
//! already correct are left out so they keep their `updated_at`.

use super::{SortOrder, Task, TaskId};
use crate::lane::domain::LaneId;

/// A write required to bring one task to its planned lane and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlacement {
    /// Task to write.
    pub task_id: TaskId,
    /// Lane the task must end up in.
    pub status: LaneId,
    /// Key the task must end up with.
    pub sort_order: SortOrder,
}

/// Returns the key for appending a task after every task in a lane.
///
/// Keys below zero are treated as zero, so the result is never below
/// [`SortOrder::STEP`].
#[must_use]
pub fn next_sort_order(tasks_in_lane: &[Task]) -> SortOrder {
    let max = tasks_in_lane
        .iter()
        .map(Task::sort_order)
        .max()
        .unwrap_or(SortOrder::new(0))
        .max(SortOrder::new(0));
    max.next()
}

/// Plans contiguous keys for tasks already in display order.
///
/// Position `i` receives `(i + 1) * 1000`. A task is written only when its
/// key or lane differs from the plan, unless its id is in `always_write`.
#[must_use]
pub fn repack_lane(lane: &LaneId, ordered: &[Task], always_write: &[TaskId]) -> Vec<TaskPlacement> {
    ordered
        .iter()
        .enumerate()
        .filter_map(|(position, task)| {
            let target = SortOrder::for_position(position);
            let unchanged = task.sort_order() == target && task.status() == lane;
            if unchanged && !always_write.contains(&task.id()) {
                return None;
            }
            Some(TaskPlacement {
                task_id: task.id(),
                status: lane.clone(),
                sort_order: target,
            })
        })
        .collect()
}

/// Result of planning a task move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Index the moved task occupies in the destination lane.
    pub destination_index: usize,
    /// Writes for the destination lane followed by the source lane.
    pub placements: Vec<TaskPlacement>,
}

/// Plans moving `moving` to `index` within `destination`.
///
/// `source_lane` and `destination_lane` are the current contents of the
/// task's lane and the destination lane, each ordered by key; the moved task
/// may appear in either and is ignored there. When the lanes are the same the
/// destination contents are taken from `source_lane`. The index is clamped to
/// the destination length. The moved task is always written; the source lane
/// is repacked only when it differs from the destination.
#[must_use]
pub fn plan_move(
    moving: &Task,
    source_lane: &[Task],
    destination_lane: &[Task],
    destination: &LaneId,
    index: usize,
) -> MovePlan {
    let same_lane = moving.status() == destination;
    let source_list = without(source_lane, moving.id());
    let mut destination_list = if same_lane {
        source_list.clone()
    } else {
        without(destination_lane, moving.id())
    };

    let destination_index = index.min(destination_list.len());
    destination_list.insert(destination_index, moving.clone());

    let mut placements = repack_lane(destination, &destination_list, &[moving.id()]);
    if !same_lane {
        placements.extend(repack_lane(moving.status(), &source_list, &[]));
    }

    MovePlan {
        destination_index,
        placements,
    }
}

/// Plans appending tasks from removed lanes to the end of `destination`.
///
/// `incoming` holds the tasks of each removed lane in key order, batches in
/// processing order. They follow the destination's existing tasks and the
/// whole lane is repacked.
#[must_use]
pub fn plan_lane_absorption(
    destination: &LaneId,
    destination_lane: &[Task],
    incoming: &[Vec<Task>],
) -> Vec<TaskPlacement> {
    let combined: Vec<Task> = destination_lane
        .iter()
        .chain(incoming.iter().flatten())
        .cloned()
        .collect();
    repack_lane(destination, &combined, &[])
}

fn without(tasks: &[Task], excluded: TaskId) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.id() != excluded)
        .cloned()
        .collect()
}
