use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewTask, Task};
use super::errors::TaskStoreError;

/// Persistence abstraction for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new open task with a freshly generated id.
    /// `TaskStoreError::OwnerNotFound` when the store can tell the owner is gone.
    async fn insert(&self, task: NewTask) -> Result<Task, TaskStoreError>;

    /// `TaskStoreError::NotFound` when no task has this id.
    async fn find_by_id(&self, id: Uuid) -> Result<Task, TaskStoreError>;

    /// Tasks owned by `owner_id`; empty for an owner with no tasks.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, TaskStoreError>;

    /// Replace content and completion of an existing task.
    async fn update(&self, task: &Task) -> Result<(), TaskStoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), TaskStoreError>;
}
