//! The authoritative in-memory state: the current snapshot plus the UI's
//! selection, advanced one [`Action`] at a time.

use chrono::NaiveDate;
use tracing::trace;

use crate::model::ids::{ListId, TaskId};
use crate::model::selection::{Filter, Selection, TaskOrder};
use crate::model::snapshot::Snapshot;
use crate::model::task::{DraftUpdate, Task};
use crate::ops::filter::filtered_tasks_by;
use crate::ops::id_source::{ClockIds, IdSource};
use crate::ops::navigate::{Direction, step_list, step_task};
use crate::ops::{list_ops, task_ops};

/// One state transition requested by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTaskList {
        name: String,
    },
    DeleteTaskList {
        list: ListId,
    },
    SelectTaskList {
        list: ListId,
    },
    SetFilter(Filter),
    AddTask {
        list: ListId,
        text: String,
        due_date: Option<NaiveDate>,
    },
    BeginEdit {
        list: ListId,
        task: TaskId,
    },
    UpdateDraft {
        list: ListId,
        task: TaskId,
        update: DraftUpdate,
    },
    CommitEdit {
        list: ListId,
        task: TaskId,
    },
    CancelEdit {
        list: ListId,
        task: TaskId,
    },
    DeleteTask {
        list: ListId,
        task: TaskId,
    },
    ToggleCompletion {
        list: ListId,
        task: TaskId,
    },
    /// Move the list selection
    StepList(Direction),
    /// Move the task cursor through the visible tasks
    StepTask(Direction),
}

/// What a dispatched action changed.
///
/// `lists_changed` covers any new snapshot, edit state included.
/// `stored_changed` is set only when the persisted document differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub lists_changed: bool,
    pub stored_changed: bool,
    pub selection_changed: bool,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        !self.lists_changed && !self.selection_changed
    }
}

pub struct Store {
    snapshot: Snapshot,
    selection: Selection,
    order: TaskOrder,
    ids: Box<dyn IdSource>,
}

impl Store {
    /// Store seeded with `initial`, minting ids past any it already holds
    pub fn new(initial: Snapshot) -> Self {
        let ids = Box::new(ClockIds::after(&initial));
        Self::with_ids(initial, ids)
    }

    pub fn with_ids(initial: Snapshot, ids: Box<dyn IdSource>) -> Self {
        Store {
            snapshot: initial,
            selection: Selection::default(),
            order: TaskOrder::default(),
            ids,
        }
    }

    pub fn with_order(mut self, order: TaskOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.selection.filter = filter;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn order(&self) -> TaskOrder {
        self.order
    }

    /// Swap in a whole snapshot, e.g. once a late load has completed.
    /// A selection pointing at a list that no longer exists is dropped.
    pub fn replace(&mut self, snapshot: Snapshot) -> Transition {
        let lists_changed = snapshot != self.snapshot;
        let stored_changed = !snapshot.stored_eq(&self.snapshot);
        self.snapshot = snapshot;
        let before = self.selection;
        if let Some(list) = self.selection.list
            && self.snapshot.list(list).is_none()
        {
            self.selection = self.selection.forget_list(list);
        }
        Transition {
            lists_changed,
            stored_changed,
            selection_changed: before != self.selection,
        }
    }

    /// Tasks of an arbitrary list under the store's ordering
    pub fn filtered_tasks(&self, list: ListId, filter: Filter) -> Vec<&Task> {
        filtered_tasks_by(&self.snapshot, list, filter, self.order)
    }

    /// Tasks of the selected list under the current filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.selection.list {
            Some(list) => self.filtered_tasks(list, self.selection.filter),
            None => Vec::new(),
        }
    }

    /// Fold one action over the current state
    pub fn dispatch(&mut self, action: Action) -> Transition {
        trace!(?action, "dispatch");
        let before = self.selection;
        let next = match action {
            Action::AddTaskList { name } => {
                Some(list_ops::add_task_list(&self.snapshot, &name, self.ids.as_mut()))
            }
            Action::DeleteTaskList { list } => {
                self.selection = self.selection.forget_list(list);
                Some(list_ops::delete_task_list(&self.snapshot, list))
            }
            Action::SelectTaskList { list } => {
                self.selection = list_ops::select_task_list(self.selection, list);
                None
            }
            Action::SetFilter(filter) => {
                self.selection.filter = filter;
                None
            }
            Action::AddTask {
                list,
                text,
                due_date,
            } => Some(task_ops::add_task(
                &self.snapshot,
                list,
                &text,
                due_date,
                self.ids.as_mut(),
            )),
            Action::BeginEdit { list, task } => {
                Some(task_ops::begin_edit(&self.snapshot, list, task))
            }
            Action::UpdateDraft { list, task, update } => {
                Some(task_ops::update_draft(&self.snapshot, list, task, update))
            }
            Action::CommitEdit { list, task } => {
                Some(task_ops::commit_edit(&self.snapshot, list, task))
            }
            Action::CancelEdit { list, task } => {
                Some(task_ops::cancel_edit(&self.snapshot, list, task))
            }
            Action::DeleteTask { list, task } => {
                if self.selection.list == Some(list) && self.selection.cursor == Some(task) {
                    self.selection.cursor = None;
                }
                Some(task_ops::delete_task(&self.snapshot, list, task))
            }
            Action::ToggleCompletion { list, task } => {
                Some(task_ops::toggle_completion(&self.snapshot, list, task))
            }
            Action::StepList(dir) => {
                if let Some(list) = step_list(&self.snapshot, self.selection.list, dir)
                    && self.selection.list != Some(list)
                {
                    self.selection = self.selection.select(list);
                }
                None
            }
            Action::StepTask(dir) => {
                let cursor = step_task(&self.visible_tasks(), self.selection.cursor, dir);
                self.selection.cursor = cursor;
                None
            }
        };

        let (lists_changed, stored_changed) = match next {
            Some(snapshot) if snapshot != self.snapshot => {
                let stored_changed = !snapshot.stored_eq(&self.snapshot);
                self.snapshot = snapshot;
                (true, stored_changed)
            }
            _ => (false, false),
        };
        Transition {
            lists_changed,
            stored_changed,
            selection_changed: before != self.selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::id_source::SequentialIds;

    fn store() -> Store {
        Store::with_ids(Snapshot::default(), Box::new(SequentialIds::new()))
    }

    fn add_list(store: &mut Store, name: &str) -> ListId {
        store.dispatch(Action::AddTaskList { name: name.into() });
        store.snapshot().lists().last().unwrap().id
    }

    fn add_task(store: &mut Store, list: ListId, text: &str) -> TaskId {
        store.dispatch(Action::AddTask {
            list,
            text: text.into(),
            due_date: None,
        });
        store.snapshot().list(list).unwrap().tasks.last().unwrap().id
    }

    #[test]
    fn dispatch_reports_list_changes() {
        let mut s = store();
        let t = s.dispatch(Action::AddTaskList { name: "Work".into() });
        assert!(t.lists_changed);
        assert!(!t.selection_changed);

        let t = s.dispatch(Action::AddTaskList { name: "  ".into() });
        assert!(t.is_noop());
    }

    #[test]
    fn selection_changes_do_not_touch_lists() {
        let mut s = store();
        let work = add_list(&mut s, "Work");
        let before = s.snapshot().clone();
        let t = s.dispatch(Action::SelectTaskList { list: work });
        assert_eq!(
            t,
            Transition {
                lists_changed: false,
                stored_changed: false,
                selection_changed: true
            }
        );
        assert_eq!(s.snapshot(), &before);
        assert_eq!(s.selection().list, Some(work));
    }

    #[test]
    fn deleting_selected_list_clears_selection() {
        let mut s = store();
        let a = add_list(&mut s, "A");
        let b = add_list(&mut s, "B");
        s.dispatch(Action::SelectTaskList { list: a });

        s.dispatch(Action::DeleteTaskList { list: b });
        assert_eq!(s.selection().list, Some(a));

        let t = s.dispatch(Action::DeleteTaskList { list: a });
        assert!(t.lists_changed && t.selection_changed);
        assert_eq!(s.selection().list, None);
        assert!(s.snapshot().is_empty());
    }

    #[test]
    fn visible_tasks_follow_selection_and_filter() {
        let mut s = store();
        let list = add_list(&mut s, "Groceries");
        let milk = add_task(&mut s, list, "Milk");
        add_task(&mut s, list, "Eggs");
        assert!(s.visible_tasks().is_empty());

        s.dispatch(Action::SelectTaskList { list });
        s.dispatch(Action::ToggleCompletion { list, task: milk });
        s.dispatch(Action::SetFilter(Filter::Pending));
        let texts: Vec<_> = s.visible_tasks().iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["Eggs"]);
    }

    #[test]
    fn edit_cycle_through_dispatch() {
        let mut s = store();
        let list = add_list(&mut s, "Groceries");
        let milk = add_task(&mut s, list, "Milk");
        s.dispatch(Action::BeginEdit { list, task: milk });
        s.dispatch(Action::UpdateDraft {
            list,
            task: milk,
            update: DraftUpdate::text("Oat milk"),
        });
        s.dispatch(Action::CommitEdit { list, task: milk });
        let task = s.snapshot().task(list, milk).unwrap();
        assert_eq!(task.text, "Oat milk");
        assert!(!task.is_editing());
    }

    #[test]
    fn edit_mode_changes_are_not_stored_changes() {
        let mut s = store();
        let list = add_list(&mut s, "Groceries");
        let milk = add_task(&mut s, list, "Milk");

        let t = s.dispatch(Action::BeginEdit { list, task: milk });
        assert!(t.lists_changed && !t.stored_changed);
        let t = s.dispatch(Action::UpdateDraft {
            list,
            task: milk,
            update: DraftUpdate::text("Oat milk"),
        });
        assert!(t.lists_changed && !t.stored_changed);
        let t = s.dispatch(Action::CommitEdit { list, task: milk });
        assert!(t.lists_changed && t.stored_changed);
    }

    #[test]
    fn step_list_and_cursor() {
        let mut s = store();
        let a = add_list(&mut s, "A");
        let b = add_list(&mut s, "B");
        let t1 = add_task(&mut s, b, "one");
        let t2 = add_task(&mut s, b, "two");

        s.dispatch(Action::StepList(Direction::Down));
        assert_eq!(s.selection().list, Some(a));
        s.dispatch(Action::StepList(Direction::Down));
        assert_eq!(s.selection().list, Some(b));
        let t = s.dispatch(Action::StepList(Direction::Down));
        assert!(t.is_noop());

        s.dispatch(Action::StepTask(Direction::Down));
        assert_eq!(s.selection().cursor, Some(t1));
        s.dispatch(Action::StepTask(Direction::Down));
        assert_eq!(s.selection().cursor, Some(t2));

        // Deleting the task under the cursor clears it
        s.dispatch(Action::DeleteTask { list: b, task: t2 });
        assert_eq!(s.selection().cursor, None);

        // Changing list resets the cursor
        s.dispatch(Action::StepTask(Direction::First));
        s.dispatch(Action::StepList(Direction::Up));
        assert_eq!(s.selection().list, Some(a));
        assert_eq!(s.selection().cursor, None);
    }

    #[test]
    fn replace_drops_stale_selection() {
        let mut s = store();
        let a = add_list(&mut s, "A");
        s.dispatch(Action::SelectTaskList { list: a });
        let t = s.replace(Snapshot::default());
        assert!(t.lists_changed && t.selection_changed);
        assert_eq!(s.selection().list, None);
    }

    #[test]
    fn new_store_mints_past_loaded_ids() {
        use crate::model::TaskList;
        let far_future = i64::MAX / 2;
        let loaded = Snapshot::new(vec![TaskList::new(ListId(far_future), "Old".into())]);
        let mut s = Store::new(loaded);
        let id = add_list(&mut s, "New");
        assert!(id.0 > far_future);
    }

    #[test]
    fn insertion_order_store() {
        use chrono::NaiveDate;
        let mut s = store().with_order(TaskOrder::Insertion);
        let list = add_list(&mut s, "L");
        add_task(&mut s, list, "first");
        s.dispatch(Action::AddTask {
            list,
            text: "dated".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        });
        let texts: Vec<_> = s
            .filtered_tasks(list, Filter::All)
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(texts, vec!["first", "dated"]);
    }
}
