use serde::{Deserialize, Serialize};

use crate::model::ids::{ListId, TaskId};
use crate::model::list::TaskList;
use crate::model::task::Task;

/// Immutable copy of the whole task-list collection at one point in time.
///
/// Serializes as a bare JSON array of lists, which is the storage format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    lists: Vec<TaskList>,
}

impl Snapshot {
    pub fn new(lists: Vec<TaskList>) -> Self {
        Snapshot { lists }
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn list(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn task(&self, list: ListId, task: TaskId) -> Option<&Task> {
        self.list(list).and_then(|l| l.task(task))
    }

    /// First list whose name matches exactly
    pub fn list_named(&self, name: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.name == name)
    }

    /// Same document once written to storage, i.e. equal up to edit state
    pub fn stored_eq(&self, other: &Snapshot) -> bool {
        self.lists.len() == other.lists.len()
            && self.lists.iter().zip(&other.lists).all(|(a, b)| {
                a.id == b.id
                    && a.name == b.name
                    && a.tasks.len() == b.tasks.len()
                    && a.tasks.iter().zip(&b.tasks).all(|(x, y)| x.stored_eq(y))
            })
    }

    /// Largest id in use by any list or task, if any
    pub fn max_id(&self) -> Option<i64> {
        self.lists
            .iter()
            .flat_map(|l| std::iter::once(l.id.0).chain(l.tasks.iter().map(|t| t.id.0)))
            .max()
    }

    pub fn into_lists(self) -> Vec<TaskList> {
        self.lists
    }
}

impl From<Vec<TaskList>> for Snapshot {
    fn from(lists: Vec<TaskList>) -> Self {
        Snapshot::new(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut groceries = TaskList::new(ListId(10), "Groceries".into());
        groceries.tasks.push(Task::new(TaskId(11), "Milk".into(), None));
        groceries.tasks.push(Task::new(TaskId(40), "Eggs".into(), None));
        let work = TaskList::new(ListId(20), "Work".into());
        Snapshot::new(vec![groceries, work])
    }

    #[test]
    fn lookups() {
        let snap = sample();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.list(ListId(20)).unwrap().name, "Work");
        assert_eq!(snap.task(ListId(10), TaskId(40)).unwrap().text, "Eggs");
        assert!(snap.task(ListId(20), TaskId(40)).is_none());
        assert_eq!(snap.list_named("Groceries").unwrap().id, ListId(10));
        assert!(snap.list_named("groceries").is_none());
    }

    #[test]
    fn stored_eq_ignores_edit_state() {
        use crate::model::task::{Draft, EditState};
        let before = sample();
        let mut lists = before.clone().into_lists();
        lists[0].tasks[0].edit_state = EditState::Editing(Draft {
            text: "changed".into(),
            due_date: None,
        });
        let editing = Snapshot::new(lists);
        assert_ne!(editing, before);
        assert!(editing.stored_eq(&before));

        let mut lists = before.clone().into_lists();
        lists[0].tasks[0].completed = !lists[0].tasks[0].completed;
        assert!(!Snapshot::new(lists).stored_eq(&before));
        assert!(!Snapshot::default().stored_eq(&before));
    }

    #[test]
    fn max_id_covers_tasks() {
        assert_eq!(sample().max_id(), Some(40));
        assert_eq!(Snapshot::default().max_id(), None);
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Snapshot::default()).unwrap();
        assert_eq!(json, "[]");
    }
}
