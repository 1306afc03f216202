use thiserror::Error;

/// Errors from task storage operations.
///
/// A closed set with user-facing display strings. Transport failures from
/// `libsql` are folded into the variant for the operation that was running,
/// so callers never see driver error types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to load tasks: {0}")]
    Load(String),

    #[error("Failed to add task: {0}")]
    Add(String),

    #[error("Failed to update task: {0}")]
    Update(String),

    #[error("Failed to delete task: {0}")]
    Delete(String),

    #[error("Task not found")]
    TaskNotFound,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
