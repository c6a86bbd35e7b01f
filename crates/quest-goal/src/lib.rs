//! # quest-goal
//!
//! Goal tracking and scoring for Eternal Quest.
//!
//! A [`Goal`] is one of three variants: a one-shot [`SimpleGoal`], a
//! never-ending [`EternalGoal`], or a [`ChecklistGoal`] that completes after a
//! fixed number of events and pays a bonus on the last one. A
//! [`GoalManager`] keeps the goals in order and accumulates the score from
//! every recorded event.
//!
//! ## Key components
//!
//! - [`Goal`] — the closed variant set and its shared operations
//! - [`codec`] — one-line `|`-delimited records for each goal
//! - [`GoalManager`] — add, record, list, and save/load over any reader/writer
//! - [`GoalFile`] — file-backed save/load with scoped handles
//! - [`QuestEvent`] / [`EventDispatcher`] — JSONL activity log
//! - [`QuestConfig`] — `.quest/config.toml`
//!
//! ## Quick Example
//!
//! ```rust
//! use quest_goal::{ChecklistGoal, GoalManager};
//!
//! let mut manager = GoalManager::new();
//! manager.add(ChecklistGoal::new("Temple", "Attend the temple", 10, 3, 5).unwrap());
//! manager.record_goal_completion(0);
//! assert_eq!(manager.score(), 10);
//! ```
//!
//! ## Save format
//!
//! The first line is the score; each following line is one goal record.
//! Names and descriptions may not contain `|` or line breaks, since the
//! format has no escaping. Constructors reject such text.

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod manager;
pub mod store;

pub use config::{ProjectConfig, QuestConfig};
pub use error::GoalError;
pub use events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use goal::{ChecklistGoal, EternalGoal, Goal, GoalInfo, GoalKind, SimpleGoal};
pub use manager::{EventOutcome, GoalManager};
pub use store::GoalFile;
