// goal.rs — Goal: the trackable unit and its three variants.
//
// Every goal carries a name, a description, and a base point value. The
// variants differ in how an event changes their state:
//   Simple    — the first event completes it
//   Eternal   — never completes, every event scores
//   Checklist — completes after `target_count` events, bonus on the last one
//
// Completion is monotonic: no operation ever moves a goal from complete back
// to incomplete.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::GoalError;

/// Which variant a goal is. The `Display` form is the literal record tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Simple,
    Eternal,
    Checklist,
}

impl GoalKind {
    /// The tag written as field 0 of a serialized record.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple => "SimpleGoal",
            GoalKind::Eternal => "EternalGoal",
            GoalKind::Checklist => "ChecklistGoal",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GoalKind {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SimpleGoal" => Ok(GoalKind::Simple),
            "EternalGoal" => Ok(GoalKind::Eternal),
            "ChecklistGoal" => Ok(GoalKind::Checklist),
            other => Err(GoalError::UnknownVariant {
                tag: other.to_string(),
            }),
        }
    }
}

/// Fields shared by every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalInfo {
    name: String,
    description: String,
    points: i64,
}

impl GoalInfo {
    /// Validate and build the shared fields.
    ///
    /// The record format has no escaping, so the delimiter and line breaks
    /// are rejected here rather than corrupting a save file later.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(GoalError::InvalidGoal("name must not be empty".to_string()));
        }
        Self::restore(name, description, points)
    }

    /// Rebuild the shared fields from saved data.
    ///
    /// Only text the record format cannot hold is rejected; an empty name
    /// written by an older save is accepted as-is.
    pub fn restore(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        let name = name.into();
        let description = description.into();
        check_text("name", &name)?;
        check_text("description", &description)?;
        Ok(Self {
            name,
            description,
            points,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> i64 {
        self.points
    }
}

fn check_text(field: &str, value: &str) -> Result<(), GoalError> {
    if value.contains(codec::DELIMITER) || value.contains(['\n', '\r']) {
        return Err(GoalError::InvalidGoal(format!(
            "{} must not contain '{}' or line breaks: {:?}",
            field,
            codec::DELIMITER,
            value
        )));
    }
    Ok(())
}

/// A one-shot goal: the first event completes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleGoal {
    info: GoalInfo,
    complete: bool,
}

impl SimpleGoal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Ok(Self {
            info: GoalInfo::new(name, description, points)?,
            complete: false,
        })
    }

    /// Rebuild a goal that may already be complete (used when loading).
    pub fn restore(info: GoalInfo, complete: bool) -> Self {
        Self { info, complete }
    }

    pub fn info(&self) -> &GoalInfo {
        &self.info
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn record_event(&mut self) -> i64 {
        if self.complete {
            return 0;
        }
        self.complete = true;
        self.info.points
    }
}

/// A repeating goal that never completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EternalGoal {
    info: GoalInfo,
}

impl EternalGoal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Ok(Self {
            info: GoalInfo::new(name, description, points)?,
        })
    }

    pub fn restore(info: GoalInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &GoalInfo {
        &self.info
    }
}

/// A goal that needs `target_count` events, paying `bonus_points` on the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistGoal {
    info: GoalInfo,
    target_count: u32,
    bonus_points: i64,
    current_count: u32,
}

impl ChecklistGoal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target_count: u32,
        bonus_points: i64,
    ) -> Result<Self, GoalError> {
        Self::restore(
            GoalInfo::new(name, description, points)?,
            target_count,
            bonus_points,
            0,
        )
    }

    /// Rebuild a checklist with existing progress.
    pub fn restore(
        info: GoalInfo,
        target_count: u32,
        bonus_points: i64,
        current_count: u32,
    ) -> Result<Self, GoalError> {
        if target_count == 0 {
            return Err(GoalError::InvalidGoal(
                "target count must be greater than zero".to_string(),
            ));
        }
        if current_count > target_count {
            return Err(GoalError::InvalidGoal(format!(
                "current count {} exceeds target count {}",
                current_count, target_count
            )));
        }
        Ok(Self {
            info,
            target_count,
            bonus_points,
            current_count,
        })
    }

    pub fn info(&self) -> &GoalInfo {
        &self.info
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn bonus_points(&self) -> i64 {
        self.bonus_points
    }

    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    pub fn is_complete(&self) -> bool {
        self.current_count == self.target_count
    }

    /// The final event pays `points + bonus_points`, saturating at the
    /// `i64` bounds.
    fn record_event(&mut self) -> i64 {
        if self.is_complete() {
            return 0;
        }
        self.current_count += 1;
        if self.is_complete() {
            self.info.points.saturating_add(self.bonus_points)
        } else {
            self.info.points
        }
    }
}

/// A trackable goal of any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Goal {
    Simple(SimpleGoal),
    Eternal(EternalGoal),
    Checklist(ChecklistGoal),
}

impl Goal {
    pub fn kind(&self) -> GoalKind {
        match self {
            Goal::Simple(_) => GoalKind::Simple,
            Goal::Eternal(_) => GoalKind::Eternal,
            Goal::Checklist(_) => GoalKind::Checklist,
        }
    }

    pub fn info(&self) -> &GoalInfo {
        match self {
            Goal::Simple(g) => g.info(),
            Goal::Eternal(g) => g.info(),
            Goal::Checklist(g) => g.info(),
        }
    }

    pub fn name(&self) -> &str {
        self.info().name()
    }

    pub fn description(&self) -> &str {
        self.info().description()
    }

    pub fn points(&self) -> i64 {
        self.info().points()
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Goal::Simple(g) => g.is_complete(),
            Goal::Eternal(_) => false,
            Goal::Checklist(g) => g.is_complete(),
        }
    }

    /// Apply one event and return the points it earned.
    ///
    /// Events on an already-complete simple or checklist goal change nothing
    /// and earn 0.
    pub fn record_event(&mut self) -> i64 {
        match self {
            Goal::Simple(g) => g.record_event(),
            Goal::Eternal(g) => g.info.points,
            Goal::Checklist(g) => g.record_event(),
        }
    }

    /// Human-readable line: check mark, name, description, and progress.
    pub fn details(&self) -> String {
        let info = self.info();
        match self {
            Goal::Simple(g) => format!(
                "{} {}: {}",
                check_mark(g.is_complete()),
                info.name,
                info.description
            ),
            Goal::Eternal(_) => format!("[ ] {}: {} (eternal)", info.name, info.description),
            Goal::Checklist(g) => format!(
                "{} {}: {} (Completed {}/{})",
                check_mark(g.is_complete()),
                info.name,
                info.description,
                g.current_count,
                g.target_count
            ),
        }
    }

    /// The single-line persisted record for this goal.
    pub fn serialized(&self) -> String {
        codec::encode(self)
    }
}

fn check_mark(complete: bool) -> &'static str {
    if complete {
        "[X]"
    } else {
        "[ ]"
    }
}

impl From<SimpleGoal> for Goal {
    fn from(goal: SimpleGoal) -> Self {
        Goal::Simple(goal)
    }
}

impl From<EternalGoal> for Goal {
    fn from(goal: EternalGoal) -> Self {
        Goal::Eternal(goal)
    }
}

impl From<ChecklistGoal> for Goal {
    fn from(goal: ChecklistGoal) -> Self {
        Goal::Checklist(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist() -> Goal {
        ChecklistGoal::new("Temple", "Attend the temple", 10, 3, 5)
            .unwrap()
            .into()
    }

    #[test]
    fn simple_goal_completes_on_first_event() {
        let mut goal: Goal = SimpleGoal::new("Marathon", "Run a marathon", 1000)
            .unwrap()
            .into();
        assert!(!goal.is_complete());
        assert_eq!(goal.record_event(), 1000);
        assert!(goal.is_complete());
    }

    #[test]
    fn completed_simple_goal_earns_nothing_more() {
        let mut goal: Goal = SimpleGoal::new("Marathon", "Run a marathon", 1000)
            .unwrap()
            .into();
        goal.record_event();
        assert_eq!(goal.record_event(), 0);
        assert_eq!(goal.record_event(), 0);
        assert!(goal.is_complete());
    }

    #[test]
    fn eternal_goal_scores_forever_and_never_completes() {
        let mut goal: Goal = EternalGoal::new("Scriptures", "Read daily", 100)
            .unwrap()
            .into();
        for _ in 0..10 {
            assert_eq!(goal.record_event(), 100);
            assert!(!goal.is_complete());
        }
    }

    #[test]
    fn checklist_pays_bonus_on_final_event() {
        let mut goal = checklist();
        assert_eq!(goal.record_event(), 10);
        assert_eq!(goal.record_event(), 10);
        assert!(!goal.is_complete());
        assert_eq!(goal.record_event(), 15);
        assert!(goal.is_complete());

        match &goal {
            Goal::Checklist(g) => assert_eq!(g.current_count(), 3),
            other => panic!("expected checklist, got {:?}", other),
        }
    }

    #[test]
    fn checklist_progress_counts_each_event() {
        let mut goal = checklist();
        goal.record_event();
        match &goal {
            Goal::Checklist(g) => assert_eq!(g.current_count(), 1),
            other => panic!("expected checklist, got {:?}", other),
        }
        goal.record_event();
        match &goal {
            Goal::Checklist(g) => assert_eq!(g.current_count(), 2),
            other => panic!("expected checklist, got {:?}", other),
        }
    }

    #[test]
    fn completed_checklist_stays_complete_and_capped() {
        let mut goal = checklist();
        for _ in 0..3 {
            goal.record_event();
        }
        assert_eq!(goal.record_event(), 0);
        assert!(goal.is_complete());
        match &goal {
            Goal::Checklist(g) => assert_eq!(g.current_count(), 3),
            other => panic!("expected checklist, got {:?}", other),
        }
    }

    #[test]
    fn details_rendering() {
        let mut simple: Goal = SimpleGoal::new("A", "first", 1).unwrap().into();
        assert_eq!(simple.details(), "[ ] A: first");
        simple.record_event();
        assert_eq!(simple.details(), "[X] A: first");

        let mut eternal: Goal = EternalGoal::new("B", "second", 1).unwrap().into();
        eternal.record_event();
        assert_eq!(eternal.details(), "[ ] B: second (eternal)");

        let mut list = checklist();
        list.record_event();
        assert_eq!(
            list.details(),
            "[ ] Temple: Attend the temple (Completed 1/3)"
        );
        list.record_event();
        list.record_event();
        assert_eq!(
            list.details(),
            "[X] Temple: Attend the temple (Completed 3/3)"
        );
    }

    #[test]
    fn constructor_rejects_unencodable_text() {
        assert!(matches!(
            SimpleGoal::new("a|b", "desc", 1),
            Err(GoalError::InvalidGoal(_))
        ));
        assert!(matches!(
            EternalGoal::new("name", "line\nbreak", 1),
            Err(GoalError::InvalidGoal(_))
        ));
        assert!(matches!(
            SimpleGoal::new("   ", "desc", 1),
            Err(GoalError::InvalidGoal(_))
        ));
    }

    #[test]
    fn checklist_rejects_bad_counts() {
        assert!(matches!(
            ChecklistGoal::new("x", "y", 1, 0, 5),
            Err(GoalError::InvalidGoal(_))
        ));
        let info = GoalInfo::new("x", "y", 1).unwrap();
        assert!(matches!(
            ChecklistGoal::restore(info, 2, 5, 3),
            Err(GoalError::InvalidGoal(_))
        ));
    }

    #[test]
    fn checklist_bonus_saturates_instead_of_overflowing() {
        let mut goal: Goal = ChecklistGoal::new("Max", "Huge payout", i64::MAX, 1, 1)
            .unwrap()
            .into();
        assert_eq!(goal.record_event(), i64::MAX);
        assert!(goal.is_complete());

        let mut goal: Goal = ChecklistGoal::new("Min", "Huge penalty", i64::MIN, 1, -1)
            .unwrap()
            .into();
        assert_eq!(goal.record_event(), i64::MIN);
    }

    #[test]
    fn restore_accepts_empty_name_but_not_delimiters() {
        let info = GoalInfo::restore("", "no name", 5).unwrap();
        assert_eq!(info.name(), "");
        assert!(matches!(
            GoalInfo::restore("a|b", "desc", 5),
            Err(GoalError::InvalidGoal(_))
        ));
        assert!(matches!(
            GoalInfo::new("", "no name", 5),
            Err(GoalError::InvalidGoal(_))
        ));
    }

    #[test]
    fn kind_tags_parse_back() {
        for kind in [GoalKind::Simple, GoalKind::Eternal, GoalKind::Checklist] {
            assert_eq!(kind.tag().parse::<GoalKind>().unwrap(), kind);
        }
        assert!(matches!(
            "NegativeGoal".parse::<GoalKind>(),
            Err(GoalError::UnknownVariant { .. })
        ));
    }
}
