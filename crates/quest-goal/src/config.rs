//! Quest configuration loaded from `.quest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GoalError;

/// Directory under the project root that holds quest state and config.
pub const QUEST_DIR: &str = ".quest";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Save file settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Event log settings
    #[serde(default)]
    pub events: EventsConfig,
}

/// Save file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Save file path, relative to the project root unless absolute
    #[serde(default = "default_save_file")]
    pub save_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
        }
    }
}

/// Event log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Write a JSONL entry for every add/record/save/load
    #[serde(default = "default_events_enabled")]
    pub enabled: bool,

    /// Event log path, relative to the project root unless absolute
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: default_events_enabled(),
            log_file: default_log_file(),
        }
    }
}

// Serde default functions
fn default_save_file() -> PathBuf {
    PathBuf::from("goals.txt")
}

fn default_events_enabled() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    Path::new(QUEST_DIR).join("events.jsonl")
}

impl QuestConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| GoalError::ConfigError(e.to_string()))
    }

    /// Parse a config file, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Path of the config file for a project.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(QUEST_DIR).join("config.toml")
    }
}

/// Configuration resolved against a project root.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_root: PathBuf,
    pub config: QuestConfig,
}

impl ProjectConfig {
    /// Load `<root>/.quest/config.toml`, or defaults when absent.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        let config = QuestConfig::load_or_default(&QuestConfig::config_path(&project_root));
        Self {
            project_root,
            config,
        }
    }

    pub fn save_path(&self) -> PathBuf {
        self.project_root.join(&self.config.storage.save_file)
    }

    /// The event log path, or `None` when event logging is disabled.
    pub fn events_path(&self) -> Option<PathBuf> {
        self.config
            .events
            .enabled
            .then(|| self.project_root.join(&self.config.events.log_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let config = QuestConfig::default();
        assert_eq!(config.storage.save_file, PathBuf::from("goals.txt"));
        assert!(config.events.enabled);
        assert_eq!(config.events.log_file, PathBuf::from(".quest/events.jsonl"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: QuestConfig = toml::from_str(
            r#"
[storage]
save_file = "quests/mine.txt"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.save_file, PathBuf::from("quests/mine.txt"));
        assert_eq!(config.events, EventsConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage\nsave_file = 3").unwrap();
        assert!(matches!(
            QuestConfig::load(&path),
            Err(GoalError::ConfigError(_))
        ));
        assert_eq!(QuestConfig::load_or_default(&path), QuestConfig::default());
    }

    #[test]
    fn project_paths_resolve_against_root() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(QUEST_DIR)).unwrap();
        fs::write(
            QuestConfig::config_path(dir.path()),
            "[storage]\nsave_file = \"saves/goals.txt\"\n\n[events]\nenabled = false\n",
        )
        .unwrap();

        let project = ProjectConfig::for_project(dir.path());
        assert_eq!(project.save_path(), dir.path().join("saves/goals.txt"));
        assert!(project.events_path().is_none());
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let project = ProjectConfig::for_project(dir.path());
        assert_eq!(project.save_path(), dir.path().join("goals.txt"));
        assert_eq!(
            project.events_path(),
            Some(dir.path().join(".quest").join("events.jsonl"))
        );
    }
}
