use std::fmt::Write;

use serde::Serialize;

use crate::model::due_date::format_due_date;
use crate::model::ids::{ListId, TaskId};
use crate::model::list::TaskList;
use crate::model::selection::Filter;
use crate::model::snapshot::Snapshot;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListSummaryJson {
    pub id: ListId,
    pub name: String,
    pub tasks: usize,
    pub completed: usize,
}

#[derive(Serialize)]
pub struct ShowJson<'a> {
    pub id: ListId,
    pub name: &'a str,
    pub filter: Filter,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub id: i64,
}

#[derive(Serialize)]
pub struct TaskChangedJson<'a> {
    pub list: ListId,
    #[serde(flatten)]
    pub task: &'a Task,
}

#[derive(Serialize)]
pub struct DeletedJson {
    pub list: ListId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskId>,
}

pub fn list_summaries(state: &Snapshot) -> Vec<ListSummaryJson> {
    state.lists().iter().map(list_summary).collect()
}

fn list_summary(list: &TaskList) -> ListSummaryJson {
    ListSummaryJson {
        id: list.id,
        name: list.name.clone(),
        tasks: list.tasks.len(),
        completed: list.completed_count(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line per list: id, name, done/total
pub fn render_lists(state: &Snapshot) -> String {
    if state.is_empty() {
        return "No task lists. Create one with `tl new <NAME>`.\n".to_string();
    }
    let id_width = state
        .lists()
        .iter()
        .map(|l| l.id.to_string().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for list in state.lists() {
        let _ = writeln!(
            out,
            "{:>width$}  {}  ({}/{} done)",
            list.id,
            list.name,
            list.completed_count(),
            list.tasks.len(),
            width = id_width
        );
    }
    out
}

/// Heading plus one line per task
pub fn render_tasks(list: &TaskList, filter: Filter, tasks: &[&Task]) -> String {
    let mut out = String::new();
    if filter == Filter::All {
        let _ = writeln!(out, "{}", list.name);
    } else {
        let _ = writeln!(out, "{} [{}]", list.name, filter);
    }
    if tasks.is_empty() {
        out.push_str("  (no tasks)\n");
        return out;
    }
    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(0);
    for task in tasks {
        let _ = writeln!(out, "  {}", task_line(task, id_width));
    }
    out
}

pub fn task_line(task: &Task, id_width: usize) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "[{}] {:>width$}  {}",
        check,
        task.id,
        task.text,
        width = id_width
    );
    if let Some(due) = task.due_date {
        let _ = write!(line, "  due {}", format_due_date(due));
    }
    line
}
