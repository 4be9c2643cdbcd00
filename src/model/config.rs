use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::selection::{Filter, TaskOrder};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory (default: $XDG_DATA_HOME/tasklists)
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Storage key the collection is written under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            dir: None,
            key: default_key(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub order: TaskOrder,
}

pub const DEFAULT_STORAGE_KEY: &str = "taskLists";

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.key, "taskLists");
        assert_eq!(config.view.filter, Filter::All);
        assert_eq!(config.view.order, TaskOrder::DueDate);
    }

    #[test]
    fn full_config() {
        let config: Config = toml::from_str(
            r#"
[storage]
dir = "/tmp/lists"
key = "work-lists"

[view]
filter = "pending"
order = "insertion"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.dir, Some(PathBuf::from("/tmp/lists")));
        assert_eq!(config.storage.key, "work-lists");
        assert_eq!(config.view.filter, Filter::Pending);
        assert_eq!(config.view.order, TaskOrder::Insertion);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(toml::from_str::<Config>("[view]\nfilter = \"someday\"\n").is_err());
    }
}
