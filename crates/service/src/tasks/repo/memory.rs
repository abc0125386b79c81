use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::tasks::domain::{NewTask, Task};
use crate::tasks::errors::TaskStoreError;
use crate::tasks::repository::TaskStore;

/// Per-instance in-memory task store. Owners are not checked here;
/// `TaskService` verifies them against the credential store.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let mut id = Uuid::new_v4();
        while tasks.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let created = Task { id, content: task.content, is_completed: false, owner_id: task.owner_id };
        tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Task, TaskStoreError> {
        self.tasks.read().await.get(&id).cloned().ok_or(TaskStoreError::NotFound)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, TaskStoreError> {
        let mut owned: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.id);
        Ok(owned)
    }

    async fn update(&self, task: &Task) -> Result<(), TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks.get_mut(&task.id).ok_or(TaskStoreError::NotFound)?;
        stored.content = task.content.clone();
        stored.is_completed = task.is_completed;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), TaskStoreError> {
        self.tasks.write().await.remove(&id).map(|_| ()).ok_or(TaskStoreError::NotFound)
    }
}
