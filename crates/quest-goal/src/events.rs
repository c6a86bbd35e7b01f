// events.rs — Quest events and notification dispatch.
//
// The CLI emits a QuestEvent after each successful operation. Sinks decide
// what to do with it; the built-in LogSink appends JSON Lines to a file.
// The core library itself never emits events, which keeps GoalManager free
// of I/O beyond explicit save/load.

use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind};
use crate::manager::{EventOutcome, GoalManager};

/// Something that happened to the goal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was created and added.
    GoalAdded {
        name: String,
        kind: GoalKind,
        timestamp: DateTime<Utc>,
    },

    /// An event was recorded against a goal.
    EventRecorded {
        name: String,
        points_earned: i64,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// A goal became complete.
    GoalCompleted {
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// The goal list was written to a save file.
    GoalsSaved {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The goal list was restored from a save file.
    GoalsLoaded {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalAdded { .. } => "goal_added",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::GoalCompleted { .. } => "goal_completed",
            QuestEvent::GoalsSaved { .. } => "goals_saved",
            QuestEvent::GoalsLoaded { .. } => "goals_loaded",
        }
    }

    pub fn goal_added(goal: &Goal) -> Self {
        QuestEvent::GoalAdded {
            name: goal.name().to_string(),
            kind: goal.kind(),
            timestamp: Utc::now(),
        }
    }

    /// Events describing one recorded outcome: always `EventRecorded`,
    /// followed by `GoalCompleted` when that event finished the goal.
    pub fn recorded(goal: &Goal, outcome: &EventOutcome) -> Vec<Self> {
        let now = Utc::now();
        let mut events = vec![QuestEvent::EventRecorded {
            name: goal.name().to_string(),
            points_earned: outcome.points_earned,
            score: outcome.score,
            timestamp: now,
        }];
        if outcome.completed {
            events.push(QuestEvent::GoalCompleted {
                name: goal.name().to_string(),
                timestamp: now,
            });
        }
        events
    }

    pub fn saved(path: &Path, manager: &GoalManager) -> Self {
        QuestEvent::GoalsSaved {
            path: path.display().to_string(),
            goal_count: manager.len(),
            score: manager.score(),
            timestamp: Utc::now(),
        }
    }

    pub fn loaded(path: &Path, manager: &GoalManager) -> Self {
        QuestEvent::GoalsLoaded {
            path: path.display().to_string(),
            goal_count: manager.len(),
            score: manager.score(),
            timestamp: Utc::now(),
        }
    }
}

/// Receives quest events.
pub trait NotificationSink {
    /// Handle an event. Errors are logged by the dispatcher, not propagated.
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError>;
}

/// Appends events as JSONL to a file.
///
/// The file is opened on the first event and the same buffered writer is
/// reused for every later one. Each line is flushed before `send` returns.
pub struct LogSink {
    path: PathBuf,
    writer: RefCell<Option<BufWriter<File>>>,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<BufWriter<File>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(BufWriter::new(file))
    }

    fn append_line(&self, line: &[u8]) -> io::Result<()> {
        let mut slot = self.writer.borrow_mut();
        let writer = match slot.take() {
            Some(writer) => writer,
            None => self.open()?,
        };
        let writer = slot.insert(writer);
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        let line = serde_json::to_vec(event)?;
        self.append_line(&line).map_err(|source| {
            // A broken handle is dropped so the next event reopens the file.
            self.writer.borrow_mut().take();
            GoalError::IoError {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Fans events out to every registered sink, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every sink and return how many rejected it.
    ///
    /// Sink failures are logged and never reach the caller.
    pub fn dispatch(&self, event: &QuestEvent) -> usize {
        self.sinks
            .iter()
            .filter_map(|sink| sink.send(event).err())
            .inspect(|e| {
                tracing::warn!(event = event.event_type(), error = %e, "event sink failed");
            })
            .count()
    }
}
