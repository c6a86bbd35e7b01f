// menu.rs — Interactive menu loop.
//
// The menu works on an in-memory manager that starts empty; nothing touches
// disk until the user picks save or load. Errors from individual actions are
// printed and the loop continues.

use std::path::PathBuf;
use std::str::FromStr;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use quest_goal::{
    ChecklistGoal, EternalGoal, Goal, GoalError, GoalFile, GoalManager, QuestEvent, SimpleGoal,
};

use super::goal::{add_goal, print_goals, record_number};
use super::Session;

const MENU: &str = "\n=== Eternal Quest - Goal Tracker ===
1. Create New Goal
2. Record Goal Completion
3. View Goals
4. View Score
5. Save Goals
6. Load Goals
7. Exit";

pub fn run(session: &Session) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut manager = GoalManager::new();

    loop {
        println!("{}", MENU);
        let Some(choice) = prompt(&mut rl, "Choose an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => create_goal(&mut rl, session, &mut manager)?,
            "2" => record_goal(&mut rl, session, &mut manager)?,
            "3" => print_goals(&manager),
            "4" => println!("{}", manager.display_score()),
            "5" => {
                let file = choose_file(&mut rl, session, "save")?;
                match file.save(&manager) {
                    Ok(()) => {
                        session.emit(&QuestEvent::saved(file.path(), &manager));
                        println!("Goals saved to {}!", file.path().display());
                    }
                    Err(e) => eprintln!("Save failed: {}", e),
                }
            }
            "6" => {
                let file = choose_file(&mut rl, session, "load")?;
                match file.load(&mut manager) {
                    Ok(()) => {
                        session.emit(&QuestEvent::loaded(file.path(), &manager));
                        println!("Goals loaded from {}!", file.path().display());
                    }
                    Err(GoalError::IoError { .. }) if !file.exists() => {
                        println!("File not found.");
                    }
                    Err(e) => eprintln!("Load failed: {}", e),
                }
            }
            "7" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid option. Try again."),
        }
    }

    Ok(())
}

fn create_goal(
    rl: &mut DefaultEditor,
    session: &Session,
    manager: &mut GoalManager,
) -> anyhow::Result<()> {
    println!("\nSelect Goal Type:");
    println!("1. Simple Goal (one-time)");
    println!("2. Eternal Goal (repeating)");
    println!("3. Checklist Goal (multiple times)");
    let Some(kind) = prompt(rl, "Goal type: ")? else {
        return Ok(());
    };
    let kind = kind.trim().to_string();
    if !matches!(kind.as_str(), "1" | "2" | "3") {
        println!("Invalid goal type.");
        return Ok(());
    }

    let Some(name) = prompt(rl, "Enter goal name: ")? else {
        return Ok(());
    };
    let Some(description) = prompt(rl, "Enter goal description: ")? else {
        return Ok(());
    };
    let Some(points) = prompt_number::<i64>(rl, "Enter points: ")? else {
        return Ok(());
    };

    let built: Result<Goal, GoalError> = match kind.as_str() {
        "1" => SimpleGoal::new(name, description, points).map(Goal::from),
        "2" => EternalGoal::new(name, description, points).map(Goal::from),
        _ => {
            let Some(target) = prompt_number::<u32>(rl, "Enter target count: ")? else {
                return Ok(());
            };
            let Some(bonus) = prompt_number::<i64>(rl, "Enter bonus points: ")? else {
                return Ok(());
            };
            ChecklistGoal::new(name, description, points, target, bonus).map(Goal::from)
        }
    };

    match built {
        Ok(goal) => {
            let kind = goal.kind();
            add_goal(session, manager, goal);
            println!("{} added!", kind);
        }
        Err(e) => eprintln!("Could not create goal: {}", e),
    }
    Ok(())
}

fn record_goal(
    rl: &mut DefaultEditor,
    session: &Session,
    manager: &mut GoalManager,
) -> anyhow::Result<()> {
    print_goals(manager);
    if manager.is_empty() {
        return Ok(());
    }
    let Some(number) = prompt_number::<usize>(rl, "Enter goal number to record: ")? else {
        return Ok(());
    };
    match record_number(session, manager, number) {
        Some(message) => println!("{}", message),
        None => println!("No goal number {}.", number),
    }
    Ok(())
}

/// Ask for a file name, defaulting to the session's save file.
fn choose_file(rl: &mut DefaultEditor, session: &Session, verb: &str) -> anyhow::Result<GoalFile> {
    let question = format!(
        "Enter filename to {} [{}]: ",
        verb,
        session.file.path().display()
    );
    let answer = prompt(rl, &question)?.unwrap_or_default();
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        session.file.clone()
    } else {
        GoalFile::new(PathBuf::from(answer))
    })
}

/// Read one line. `None` on Ctrl-C or end of input.
fn prompt(rl: &mut DefaultEditor, text: &str) -> anyhow::Result<Option<String>> {
    match rl.readline(text) {
        Ok(line) => {
            if !line.trim().is_empty() {
                note_history(rl.add_history_entry(line.as_str()));
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// True when the line went into history. Failures are logged, not fatal.
fn note_history(result: rustyline::Result<bool>) -> bool {
    match result {
        Ok(added) => added,
        Err(e) => {
            tracing::debug!(error = %e, "could not add menu input to history");
            false
        }
    }
}

/// Read a number. `None` on end of input or when the answer does not parse.
fn prompt_number<T: FromStr>(rl: &mut DefaultEditor, text: &str) -> anyhow::Result<Option<T>> {
    let Some(answer) = prompt(rl, text)? else {
        return Ok(None);
    };
    match answer.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Invalid input.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_failure_is_reported_not_raised() {
        assert!(note_history(Ok(true)));
        assert!(!note_history(Ok(false)));
        assert!(!note_history(Err(ReadlineError::Io(std::io::Error::other(
            "history full"
        )))));
    }
}
