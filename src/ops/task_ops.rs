use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::model::ids::{ListId, TaskId};
use crate::model::list::TaskList;
use crate::model::snapshot::Snapshot;
use crate::model::task::{Draft, DraftUpdate, EditState, Task};
use crate::ops::id_source::IdSource;
use crate::ops::list_ops::update_list;

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// Append a task to a list. Blank text or an unknown list leaves the
/// snapshot unchanged.
pub fn add_task(
    state: &Snapshot,
    list: ListId,
    text: &str,
    due_date: Option<NaiveDate>,
    ids: &mut dyn IdSource,
) -> Snapshot {
    let text = text.trim();
    if text.is_empty() {
        debug!(%list, "ignoring task with empty text");
        return state.clone();
    }
    update_list(state, list, |l| {
        let Some(id) = ids.next_id() else {
            warn!(%list, "no task id left to hand out");
            return None;
        };
        let mut l = l.clone();
        l.tasks.push(Task::new(TaskId(id), text.to_string(), due_date));
        Some(l)
    })
}

pub fn delete_task(state: &Snapshot, list: ListId, task: TaskId) -> Snapshot {
    update_list(state, list, |l| {
        l.task(task)?;
        let mut l = l.clone();
        l.tasks.retain(|t| t.id != task);
        Some(l)
    })
}

pub fn toggle_completion(state: &Snapshot, list: ListId, task: TaskId) -> Snapshot {
    update_task(state, list, task, |t| {
        let mut t = t.clone();
        t.completed = !t.completed;
        Some(t)
    })
}

// ---------------------------------------------------------------------------
// Edit mode
// ---------------------------------------------------------------------------

/// Enter edit mode, seeding the draft from the committed fields.
///
/// Only one task per list edits at a time: any other draft in the same
/// list is discarded.
pub fn begin_edit(state: &Snapshot, list: ListId, task: TaskId) -> Snapshot {
    update_list(state, list, |l| {
        let target = l.task(task)?;
        if target.is_editing() && l.tasks.iter().filter(|t| t.is_editing()).count() == 1 {
            return None;
        }
        let mut l = l.clone();
        for t in &mut l.tasks {
            if t.id == task {
                if !t.is_editing() {
                    t.edit_state = EditState::Editing(Draft {
                        text: t.text.clone(),
                        due_date: t.due_date,
                    });
                }
            } else if t.is_editing() {
                debug!(%list, task = %t.id, "discarding draft of other task");
                t.edit_state = EditState::Viewing;
            }
        }
        Some(l)
    })
}

/// Change draft fields of a task that is already being edited
pub fn update_draft(state: &Snapshot, list: ListId, task: TaskId, update: DraftUpdate) -> Snapshot {
    if update.is_empty() {
        return state.clone();
    }
    update_task(state, list, task, |t| {
        let EditState::Editing(draft) = &t.edit_state else {
            return None;
        };
        let mut draft = draft.clone();
        if let Some(text) = update.text {
            draft.text = text;
        }
        if let Some(due_date) = update.due_date {
            draft.due_date = due_date;
        }
        let mut t = t.clone();
        t.edit_state = EditState::Editing(draft);
        Some(t)
    })
}

/// Copy the draft into the committed fields and leave edit mode.
///
/// A draft whose text is blank is not committed; the task stays in edit
/// mode.
pub fn commit_edit(state: &Snapshot, list: ListId, task: TaskId) -> Snapshot {
    update_task(state, list, task, |t| {
        let draft = t.draft()?;
        let text = draft.text.trim();
        if text.is_empty() {
            debug!(%list, %task, "not committing blank draft");
            return None;
        }
        let mut t = t.clone();
        t.text = text.to_string();
        t.due_date = draft.due_date;
        t.edit_state = EditState::Viewing;
        Some(t)
    })
}

/// Leave edit mode without touching the committed fields
pub fn cancel_edit(state: &Snapshot, list: ListId, task: TaskId) -> Snapshot {
    update_task(state, list, task, |t| {
        if !t.is_editing() {
            return None;
        }
        let mut t = t.clone();
        t.edit_state = EditState::Viewing;
        Some(t)
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn update_task<F>(state: &Snapshot, list: ListId, task: TaskId, f: F) -> Snapshot
where
    F: FnOnce(&Task) -> Option<Task>,
{
    update_list(state, list, |l: &TaskList| {
        let Some(idx) = l.tasks.iter().position(|t| t.id == task) else {
            debug!(%list, %task, "no such task");
            return None;
        };
        let updated = f(&l.tasks[idx])?;
        let mut l = l.clone();
        l.tasks[idx] = updated;
        Some(l)
    })
}
