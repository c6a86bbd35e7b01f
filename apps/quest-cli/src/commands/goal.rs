// goal.rs — One-shot goal subcommands: add, record, list, score.
//
// Each command loads the save file (or starts empty), applies its change,
// and writes the file back only when something changed.

use anyhow::Context;
use clap::Subcommand;
use quest_goal::{
    ChecklistGoal, EternalGoal, Goal, GoalError, GoalManager, QuestEvent, SimpleGoal,
};

use super::Session;

#[derive(Subcommand, Debug, Clone)]
pub enum NewGoal {
    /// A one-time goal, complete after a single event.
    Simple {
        name: String,
        description: String,
        /// Points awarded when completed.
        #[arg(allow_negative_numbers = true)]
        points: i64,
    },
    /// A repeating goal that never completes.
    Eternal {
        name: String,
        description: String,
        /// Points awarded for every event.
        #[arg(allow_negative_numbers = true)]
        points: i64,
    },
    /// A goal that must be done several times, with a bonus at the end.
    Checklist {
        name: String,
        description: String,
        /// Points awarded for every event.
        #[arg(allow_negative_numbers = true)]
        points: i64,
        /// Number of events needed to complete the goal.
        target: u32,
        /// Extra points awarded on the final event.
        #[arg(allow_negative_numbers = true)]
        bonus: i64,
    },
}

impl NewGoal {
    pub fn build(&self) -> Result<Goal, GoalError> {
        Ok(match self {
            NewGoal::Simple {
                name,
                description,
                points,
            } => SimpleGoal::new(name, description, *points)?.into(),
            NewGoal::Eternal {
                name,
                description,
                points,
            } => EternalGoal::new(name, description, *points)?.into(),
            NewGoal::Checklist {
                name,
                description,
                points,
                target,
                bonus,
            } => ChecklistGoal::new(name, description, *points, *target, *bonus)?.into(),
        })
    }
}

pub fn add(session: &Session, new_goal: &NewGoal) -> anyhow::Result<()> {
    let mut manager = load(session)?;
    let goal = new_goal.build()?;
    let kind = goal.kind();
    add_goal(session, &mut manager, goal);
    save(session, &manager)?;
    println!("{} added!", kind);
    Ok(())
}

pub fn record(session: &Session, number: usize) -> anyhow::Result<()> {
    let mut manager = load(session)?;
    let message = record_number(session, &mut manager, number);
    if message.is_some() {
        save(session, &manager)?;
    }
    println!(
        "{}",
        message.unwrap_or_else(|| format!("No goal number {}.", number))
    );
    Ok(())
}

pub fn list(session: &Session) -> anyhow::Result<()> {
    let manager = load(session)?;
    print_goals(&manager);
    Ok(())
}

pub fn score(session: &Session) -> anyhow::Result<()> {
    let manager = load(session)?;
    println!("{}", manager.display_score());
    Ok(())
}

/// Add a goal to the manager and log it.
pub(super) fn add_goal(session: &Session, manager: &mut GoalManager, goal: Goal) {
    session.emit(&QuestEvent::goal_added(&goal));
    manager.add(goal);
}

/// Record an event against goal `number` (1-based).
///
/// Returns the message to show, or `None` when there is no such goal.
pub(super) fn record_number(
    session: &Session,
    manager: &mut GoalManager,
    number: usize,
) -> Option<String> {
    let index = number.checked_sub(1)?;
    let outcome = manager.record_goal_completion(index)?;
    let goal = manager.get(index)?;
    for event in QuestEvent::recorded(goal, &outcome) {
        session.emit(&event);
    }

    let mut message = format!("Recorded! You earned {} points.", outcome.points_earned);
    if outcome.completed {
        message.push_str(&format!(" '{}' is complete!", goal.name()));
    }
    Some(message)
}

pub(super) fn print_goals(manager: &GoalManager) {
    if manager.is_empty() {
        println!("No goals yet.");
        return;
    }
    println!("Your Goals:");
    for line in manager.display_goals() {
        println!("{}", line);
    }
}

fn load(session: &Session) -> anyhow::Result<GoalManager> {
    let path = session.file.path();
    let manager = session
        .file
        .load_or_default()
        .with_context(|| format!("failed to load goals from {}", path.display()))?;
    if session.file.exists() {
        session.emit(&QuestEvent::loaded(path, &manager));
    }
    Ok(manager)
}

fn save(session: &Session, manager: &GoalManager) -> anyhow::Result<()> {
    let path = session.file.path();
    session
        .file
        .save(manager)
        .with_context(|| format!("failed to save goals to {}", path.display()))?;
    session.emit(&QuestEvent::saved(path, manager));
    Ok(())
}
