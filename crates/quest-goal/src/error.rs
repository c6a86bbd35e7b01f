// error.rs — Error types for the goal-tracking subsystem.
//
// Format failures (parse, unknown tag, wrong arity, invalid values) are kept
// distinct from resource failures so callers can tell a corrupt save file
// from a missing one.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, decoding, or persisting goals.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A field that must be an integer (or boolean) did not parse.
    #[error("could not parse {field} from '{value}'")]
    ParseError { field: String, value: String },

    /// The record's leading tag does not name a known goal variant.
    #[error("unknown goal variant '{tag}'")]
    UnknownVariant { tag: String },

    /// The record has the wrong number of fields for its tag.
    #[error("{tag} record expects {expected} fields, found {found}")]
    FieldCount {
        tag: String,
        expected: String,
        found: usize,
    },

    /// Goal fields were rejected at construction time.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading from or writing to an injected line source/sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize an event for the event log.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    ConfigError(String),
}

impl GoalError {
    /// True for failures caused by malformed save data rather than I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            GoalError::ParseError { .. }
                | GoalError::UnknownVariant { .. }
                | GoalError::FieldCount { .. }
                | GoalError::InvalidGoal(_)
        )
    }

    pub(crate) fn parse(field: &str, value: &str) -> Self {
        GoalError::ParseError {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_are_classified() {
        assert!(GoalError::parse("points", "ten").is_format_error());
        assert!(GoalError::UnknownVariant {
            tag: "BogusGoal".to_string()
        }
        .is_format_error());
        assert!(GoalError::InvalidGoal("empty name".to_string()).is_format_error());

        let io = GoalError::IoError {
            path: PathBuf::from("/missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!io.is_format_error());
    }

    #[test]
    fn field_count_message_names_tag() {
        let err = GoalError::FieldCount {
            tag: "ChecklistGoal".to_string(),
            expected: "7".to_string(),
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "ChecklistGoal record expects 7 fields, found 5"
        );
    }
}
