use std::cmp::Ordering;

use crate::model::ids::ListId;
use crate::model::selection::{Filter, TaskOrder};
use crate::model::snapshot::Snapshot;
use crate::model::task::Task;

/// Tasks of `list` passing `filter`, in due-date order.
///
/// Unknown lists yield nothing.
pub fn filtered_tasks(state: &Snapshot, list: ListId, filter: Filter) -> Vec<&Task> {
    filtered_tasks_by(state, list, filter, TaskOrder::DueDate)
}

pub fn filtered_tasks_by(
    state: &Snapshot,
    list: ListId,
    filter: Filter,
    order: TaskOrder,
) -> Vec<&Task> {
    let Some(list) = state.list(list) else {
        return Vec::new();
    };
    let mut tasks: Vec<&Task> = list
        .tasks
        .iter()
        .filter(|t| filter.accepts(t.completed))
        .collect();
    if order == TaskOrder::DueDate {
        // sort_by is stable, so dateless tasks keep insertion order
        tasks.sort_by(|a, b| due_date_desc(a, b));
    }
    tasks
}

/// Latest due date first; tasks with a due date before tasks without one
pub fn due_date_desc(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
