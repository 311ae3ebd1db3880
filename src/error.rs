// Error types for board operations

use thiserror::Error;

/// Errors the board's operations can report to callers.
///
/// None of these are fatal: `EmptyTitle` aborts the save and leaves the
/// collection untouched, `NotFound` is treated by callers as already-gone,
/// and `Parse` leaves the in-memory collection unmodified.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("no task with id {0}")]
    NotFound(i64),

    #[error("unknown status {0:?} (expected todo, in-progress, or done)")]
    UnknownStatus(String),

    #[error("unknown assignee {0:?} (expected rene, scott, or both)")]
    UnknownAssignee(String),

    #[error("malformed board document: {0}")]
    Parse(#[from] serde_json::Error),
}
