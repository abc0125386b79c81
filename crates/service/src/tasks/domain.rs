use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: Uuid,
    pub content: String,
    pub is_completed: bool,
    pub owner_id: Uuid,
}

/// Store input for a fresh, not yet completed task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: Uuid,
    pub content: String,
}

/// Caller-supplied task body.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub content: String,
}

/// Outward task shape; the owner is implied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: Uuid,
    pub content: String,
    pub is_completed: bool,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self { id: task.id, content: task.content, is_completed: task.is_completed }
    }
}
