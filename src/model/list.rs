use serde::{Deserialize, Serialize};

use crate::model::ids::{ListId, TaskId};
use crate::model::task::Task;

/// A named, ordered collection of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: ListId, name: String) -> Self {
        TaskList {
            id,
            name,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn editing_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_editing())
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
