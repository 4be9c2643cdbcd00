use tracing::{debug, warn};

use crate::model::ids::ListId;
use crate::model::list::TaskList;
use crate::model::selection::Selection;
use crate::model::snapshot::Snapshot;
use crate::ops::id_source::IdSource;

/// Append a new empty list. Whitespace-only names are ignored.
pub fn add_task_list(state: &Snapshot, name: &str, ids: &mut dyn IdSource) -> Snapshot {
    let name = name.trim();
    if name.is_empty() {
        debug!("ignoring list with empty name");
        return state.clone();
    }
    let Some(id) = ids.next_id() else {
        warn!("no list id left to hand out");
        return state.clone();
    };
    let mut lists = state.lists().to_vec();
    lists.push(TaskList::new(ListId(id), name.to_string()));
    Snapshot::new(lists)
}

/// Remove a list and everything in it
pub fn delete_task_list(state: &Snapshot, list: ListId) -> Snapshot {
    if state.list(list).is_none() {
        debug!(%list, "delete: no such list");
        return state.clone();
    }
    Snapshot::new(
        state
            .lists()
            .iter()
            .filter(|l| l.id != list)
            .cloned()
            .collect(),
    )
}

pub fn select_task_list(selection: Selection, list: ListId) -> Selection {
    selection.select(list)
}

/// Apply `f` to one list, returning the snapshot unchanged on a miss or
/// when `f` declines with `None`.
pub(crate) fn update_list<F>(state: &Snapshot, list: ListId, f: F) -> Snapshot
where
    F: FnOnce(&TaskList) -> Option<TaskList>,
{
    let Some(idx) = state.lists().iter().position(|l| l.id == list) else {
        debug!(%list, "no such list");
        return state.clone();
    };
    match f(&state.lists()[idx]) {
        Some(updated) => {
            let mut lists = state.lists().to_vec();
            lists[idx] = updated;
            Snapshot::new(lists)
        }
        None => state.clone(),
    }
}
