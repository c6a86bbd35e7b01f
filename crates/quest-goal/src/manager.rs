// manager.rs — GoalManager: the ordered goal list and the running score.
//
// Save/load work over any `Write`/`BufRead`, so the same code path serves
// files, in-memory buffers, and tests. Loading is all-or-nothing: the whole
// source is decoded into a fresh manager before the current state is
// replaced.

use std::io::{BufRead, Write};

use crate::codec;
use crate::error::GoalError;
use crate::goal::Goal;

/// The result of one recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// 0-based index of the goal the event was recorded against.
    pub index: usize,
    /// Points this single event earned.
    pub points_earned: i64,
    /// True when this event is the one that completed the goal.
    pub completed: bool,
    /// Score after the event was applied.
    pub score: i64,
}

/// Owns every goal and the cumulative score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalManager {
    goals: Vec<Goal>,
    score: i64,
}

impl GoalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal. No de-duplication.
    pub fn add(&mut self, goal: impl Into<Goal>) {
        let goal = goal.into();
        tracing::debug!(name = goal.name(), kind = %goal.kind(), "goal added");
        self.goals.push(goal);
    }

    /// Record one event against the goal at `index` (0-based).
    ///
    /// An out-of-range index is ignored and returns `None`. The score
    /// saturates at the `i64` bounds instead of overflowing.
    pub fn record_goal_completion(&mut self, index: usize) -> Option<EventOutcome> {
        let goal = self.goals.get_mut(index)?;
        let was_complete = goal.is_complete();
        let points_earned = goal.record_event();
        let completed = !was_complete && goal.is_complete();
        self.score = self.score.saturating_add(points_earned);

        tracing::debug!(
            index,
            name = goal.name(),
            points_earned,
            score = self.score,
            "event recorded"
        );

        Some(EventOutcome {
            index,
            points_earned,
            completed,
            score: self.score,
        })
    }

    /// One line per goal, numbered from 1.
    pub fn display_goals(&self) -> Vec<String> {
        self.goals
            .iter()
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal.details()))
            .collect()
    }

    pub fn display_score(&self) -> String {
        format!("Current Score: {}", self.score)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Write the score line followed by one record per goal.
    pub fn save<W: Write>(&self, mut sink: W) -> Result<(), GoalError> {
        writeln!(sink, "{}", self.score)?;
        for goal in &self.goals {
            writeln!(sink, "{}", codec::encode(goal))?;
        }
        sink.flush()?;
        tracing::debug!(goals = self.goals.len(), score = self.score, "goals saved");
        Ok(())
    }

    /// Replace this manager's state with the contents of `source`.
    ///
    /// On any error the current state is left untouched.
    pub fn load<R: BufRead>(&mut self, source: R) -> Result<(), GoalError> {
        let loaded = Self::from_lines(source)?;
        *self = loaded;
        tracing::debug!(goals = self.goals.len(), score = self.score, "goals loaded");
        Ok(())
    }

    fn from_lines<R: BufRead>(source: R) -> Result<Self, GoalError> {
        let mut lines = source.lines();
        let first = lines.next().transpose()?.unwrap_or_default();
        let score = codec::parse_number::<i64>("score", first.trim_end_matches('\r'))?;

        let mut goals = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let goal = codec::decode(&line).inspect_err(|e| {
                // Line 1 is the score, so records start at line 2.
                tracing::warn!(line = i + 2, "failed to decode goal record: {}", e);
            })?;
            goals.push(goal);
        }

        Ok(Self { goals, score })
    }
}
