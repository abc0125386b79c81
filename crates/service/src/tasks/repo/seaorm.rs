use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::{errors::ModelError, tasks};

use crate::tasks::domain::{NewTask, Task};
use crate::tasks::errors::TaskStoreError;
use crate::tasks::repository::TaskStore;

/// Durable store over the `tasks` table. The `owner_id` foreign key rejects
/// tasks for accounts that do not exist.
pub struct SeaOrmTaskStore {
    pub db: DatabaseConnection,
}

impl SeaOrmTaskStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_task(m: tasks::Model) -> Task {
    Task { id: m.id, content: m.content, is_completed: m.is_completed, owner_id: m.owner_id }
}

fn store_error(e: ModelError) -> TaskStoreError {
    match e {
        ModelError::NotFound => TaskStoreError::NotFound,
        ModelError::ForeignKeyViolation(_) => TaskStoreError::OwnerNotFound,
        other => TaskStoreError::Unavailable(other.to_string()),
    }
}

#[async_trait::async_trait]
impl TaskStore for SeaOrmTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        tasks::create(&self.db, task.owner_id, &task.content)
            .await
            .map(to_task)
            .map_err(store_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Task, TaskStoreError> {
        tasks::find_by_id(&self.db, id)
            .await
            .map_err(store_error)?
            .map(to_task)
            .ok_or(TaskStoreError::NotFound)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, TaskStoreError> {
        let rows = tasks::find_by_owner(&self.db, owner_id).await.map_err(store_error)?;
        Ok(rows.into_iter().map(to_task).collect())
    }

    async fn update(&self, task: &Task) -> Result<(), TaskStoreError> {
        let row = tasks::Model {
            id: task.id,
            content: task.content.clone(),
            is_completed: task.is_completed,
            owner_id: task.owner_id,
        };
        tasks::update(&self.db, &row).await.map_err(store_error)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), TaskStoreError> {
        tasks::delete_by_id(&self.db, id).await.map_err(store_error)
    }
}
