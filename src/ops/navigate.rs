use crate::model::ids::{ListId, TaskId};
use crate::model::snapshot::Snapshot;
use crate::model::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    First,
    Last,
}

/// Move through `items` from `current`, clamping at both ends.
///
/// With no current position (or one that is no longer present) Down/First
/// land on the first item and Up/Last on the last.
pub fn step<T: Copy + PartialEq>(items: &[T], current: Option<T>, dir: Direction) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let last = items.len() - 1;
    let pos = current.and_then(|c| items.iter().position(|i| *i == c));
    let idx = match (dir, pos) {
        (Direction::First, _) => 0,
        (Direction::Last, _) => last,
        (Direction::Down, None) => 0,
        (Direction::Up, None) => last,
        (Direction::Down, Some(p)) => (p + 1).min(last),
        (Direction::Up, Some(p)) => p.saturating_sub(1),
    };
    Some(items[idx])
}

/// Next list to select, following the collection's order
pub fn step_list(state: &Snapshot, current: Option<ListId>, dir: Direction) -> Option<ListId> {
    let ids: Vec<ListId> = state.lists().iter().map(|l| l.id).collect();
    step(&ids, current, dir)
}

/// Next task under the cursor, following the visible order
pub fn step_task(visible: &[&Task], current: Option<TaskId>, dir: Direction) -> Option<TaskId> {
    let ids: Vec<TaskId> = visible.iter().map(|t| t.id).collect();
    step(&ids, current, dir)
}
