// mod.rs — Shared state for CLI commands.

pub mod goal;
pub mod menu;

use std::path::Path;

use quest_goal::{EventDispatcher, GoalFile, LogSink, ProjectConfig, QuestEvent};

/// The save file and event log a command works against.
pub struct Session {
    pub file: GoalFile,
    dispatcher: EventDispatcher,
}

impl Session {
    pub fn open(project: &ProjectConfig, file_override: Option<&Path>) -> Self {
        let save_path = match file_override {
            Some(path) => path.to_path_buf(),
            None => project.save_path(),
        };

        let mut dispatcher = EventDispatcher::new();
        if let Some(log_path) = project.events_path() {
            dispatcher.add_sink(Box::new(LogSink::new(log_path)));
        }

        tracing::debug!(save_file = %save_path.display(), "session opened");
        Self {
            file: GoalFile::new(save_path),
            dispatcher,
        }
    }

    pub fn emit(&self, event: &QuestEvent) {
        self.dispatcher.dispatch(event);
    }
}
