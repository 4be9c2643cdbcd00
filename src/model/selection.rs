use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::ids::{ListId, TaskId};

/// Completion filter applied to a list's tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }

    pub fn accepts(self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => completed,
            Filter::Pending => !completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" | "done" => Ok(Filter::Completed),
            "pending" | "todo" => Ok(Filter::Pending),
            other => Err(format!(
                "unknown filter '{other}' (expected all, completed or pending)"
            )),
        }
    }
}

/// How filtered tasks are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskOrder {
    /// Latest due date first, dateless tasks last in insertion order
    #[default]
    DueDate,
    /// Insertion order
    Insertion,
}

/// UI-side selection state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub list: Option<ListId>,
    pub filter: Filter,
    /// Highlighted task within the selected list
    pub cursor: Option<TaskId>,
}

impl Selection {
    /// Select a list. The task cursor does not carry over.
    pub fn select(self, list: ListId) -> Selection {
        Selection {
            list: Some(list),
            cursor: None,
            ..self
        }
    }

    /// Selection after `deleted` has been removed from the collection
    pub fn forget_list(self, deleted: ListId) -> Selection {
        if self.list == Some(deleted) {
            Selection {
                list: None,
                cursor: None,
                ..self
            }
        } else {
            self
        }
    }

    pub fn is_selected(&self, list: ListId) -> bool {
        self.list == Some(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts() {
        assert!(Filter::All.accepts(true));
        assert!(Filter::All.accepts(false));
        assert!(Filter::Completed.accepts(true));
        assert!(!Filter::Completed.accepts(false));
        assert!(Filter::Pending.accepts(false));
        assert!(!Filter::Pending.accepts(true));
    }

    #[test]
    fn filter_from_str() {
        assert_eq!("Pending".parse::<Filter>(), Ok(Filter::Pending));
        assert_eq!("done".parse::<Filter>(), Ok(Filter::Completed));
        assert!("later".parse::<Filter>().is_err());
    }

    #[test]
    fn select_resets_cursor() {
        let sel = Selection {
            list: Some(ListId(1)),
            filter: Filter::Pending,
            cursor: Some(TaskId(5)),
        };
        let next = sel.select(ListId(2));
        assert_eq!(next.list, Some(ListId(2)));
        assert_eq!(next.filter, Filter::Pending);
        assert_eq!(next.cursor, None);
    }

    #[test]
    fn forget_list_only_clears_the_selected_one() {
        let sel = Selection::default().select(ListId(1));
        assert_eq!(sel.forget_list(ListId(2)), sel);
        assert_eq!(sel.forget_list(ListId(1)).list, None);
    }

    #[test]
    fn order_config_names() {
        #[derive(Deserialize)]
        struct Wrap {
            order: TaskOrder,
        }
        let w: Wrap = toml::from_str(r#"order = "insertion""#).unwrap();
        assert_eq!(w.order, TaskOrder::Insertion);
        let w: Wrap = toml::from_str(r#"order = "due-date""#).unwrap();
        assert_eq!(w.order, TaskOrder::DueDate);
    }
}
