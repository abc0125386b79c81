use thiserror::Error;

/// Task store outcomes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    #[error("task not found")]
    NotFound,
    #[error("task owner does not exist")]
    OwnerNotFound,
    #[error("task store unavailable: {0}")]
    Unavailable(String),
}

/// Business errors for task workflows
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("user not found")]
    UserNotFound,
    #[error("task not found")]
    TaskNotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl TaskError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            TaskError::UserNotFound => 2001,
            TaskError::TaskNotFound => 2004,
            TaskError::Internal(_) => 2200,
        }
    }
}
