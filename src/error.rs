//! Error types for the scheduler, the action store, and settings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an [`ActionStore`](crate::store::ActionStore) or the plan file layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item with the given id exists in the store.
    #[error("Action item '{item_id}' not found")]
    NotFound { item_id: String },

    /// A date field could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// The update would leave the due date before the start date.
    #[error("Due date {due_date} is before start date {start_date}")]
    InvalidRange {
        start_date: String,
        due_date: String,
    },

    /// Reading or writing the plan file failed.
    #[error("Failed to access plan file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The plan file is not valid JSON for an action plan.
    #[error("Malformed plan file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the drag and confirmation flow.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The optimistic write during a drag was rejected.
    #[error("Could not apply new dates: {0}")]
    Store(#[from] StoreError),

    /// The compensating update that restores the pre-drag dates was rejected.
    /// The item still carries the unconfirmed dates.
    #[error("Revert of '{item_id}' failed, new dates are still saved: {source}")]
    RevertFailed {
        item_id: String,
        #[source]
        source: StoreError,
    },
}

/// Result type alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised while persisting user settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound {
            item_id: "a3-7".to_string(),
        };
        assert_eq!(err.to_string(), "Action item 'a3-7' not found");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = StoreError::InvalidRange {
            start_date: "2024-03-10".to_string(),
            due_date: "2024-03-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Due date 2024-03-01 is before start date 2024-03-10"
        );
    }

    #[test]
    fn test_revert_failed_keeps_source() {
        use std::error::Error as _;

        let err = SchedulerError::RevertFailed {
            item_id: "x".to_string(),
            source: StoreError::NotFound {
                item_id: "x".to_string(),
            },
        };
        assert!(err.to_string().starts_with("Revert of 'x' failed"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Action item 'x' not found"));
    }

    #[test]
    fn test_store_error_converts_into_scheduler_error() {
        let err: SchedulerError = StoreError::InvalidDate {
            field: "start_date",
            value: "tomorrow".to_string(),
        }
        .into();
        assert!(matches!(err, SchedulerError::Store(_)));
        assert_eq!(
            err.to_string(),
            "Could not apply new dates: Invalid start_date 'tomorrow': expected YYYY-MM-DD"
        );
    }
}
