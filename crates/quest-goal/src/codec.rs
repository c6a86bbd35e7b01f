// codec.rs — One-line delimited records for goals.
//
// Record shapes (fields joined by `|`):
//   SimpleGoal|<name>|<description>|<points>[|True]
//   EternalGoal|<name>|<description>|<points>
//   ChecklistGoal|<name>|<description>|<points>|<target>|<bonus>|<current>
//
// A completed simple goal carries a trailing `True` so its state survives a
// save/load cycle. Incomplete simple goals are always written in the 4-field
// form.

use std::str::FromStr;

use crate::error::GoalError;
use crate::goal::{ChecklistGoal, EternalGoal, Goal, GoalInfo, GoalKind, SimpleGoal};

/// Field separator. There is no escaping; goal text may not contain it.
pub const DELIMITER: char = '|';

/// Encode a goal as a single record (no trailing newline).
pub fn encode(goal: &Goal) -> String {
    let info = goal.info();
    let mut fields = vec![
        goal.kind().tag().to_string(),
        info.name().to_string(),
        info.description().to_string(),
        info.points().to_string(),
    ];
    match goal {
        Goal::Simple(g) if g.is_complete() => fields.push("True".to_string()),
        Goal::Simple(_) | Goal::Eternal(_) => {}
        Goal::Checklist(g) => {
            fields.push(g.target_count().to_string());
            fields.push(g.bonus_points().to_string());
            fields.push(g.current_count().to_string());
        }
    }
    fields.join(DELIMITER.to_string().as_str())
}

/// Decode one record back into the goal variant named by its tag.
pub fn decode(record: &str) -> Result<Goal, GoalError> {
    let record = record.strip_suffix('\r').unwrap_or(record);
    let fields: Vec<&str> = record.split(DELIMITER).collect();
    let kind: GoalKind = fields[0].parse()?;

    match kind {
        GoalKind::Simple => {
            expect_fields(kind, &fields, &[4, 5])?;
            let info = decode_info(&fields)?;
            let complete = match fields.get(4) {
                Some(flag) => parse_flag(flag)?,
                None => false,
            };
            Ok(SimpleGoal::restore(info, complete).into())
        }
        GoalKind::Eternal => {
            expect_fields(kind, &fields, &[4])?;
            Ok(EternalGoal::restore(decode_info(&fields)?).into())
        }
        GoalKind::Checklist => {
            expect_fields(kind, &fields, &[7])?;
            let info = decode_info(&fields)?;
            let target = parse_number::<u32>("target count", fields[4])?;
            let bonus = parse_number::<i64>("bonus points", fields[5])?;
            let current = parse_number::<u32>("current count", fields[6])?;
            Ok(ChecklistGoal::restore(info, target, bonus, current)?.into())
        }
    }
}

fn expect_fields(kind: GoalKind, fields: &[&str], allowed: &[usize]) -> Result<(), GoalError> {
    if allowed.contains(&fields.len()) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(GoalError::FieldCount {
        tag: kind.tag().to_string(),
        expected,
        found: fields.len(),
    })
}

fn decode_info(fields: &[&str]) -> Result<GoalInfo, GoalError> {
    let points = parse_number::<i64>("points", fields[3])?;
    GoalInfo::restore(fields[1], fields[2], points)
}

pub(crate) fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, GoalError> {
    value
        .trim()
        .parse()
        .map_err(|_| GoalError::parse(field, value))
}

fn parse_flag(value: &str) -> Result<bool, GoalError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(GoalError::parse("completion flag", value)),
    }
}
