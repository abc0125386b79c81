use std::sync::Arc;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::domain::{NewTask, Task};
use super::errors::{TaskError, TaskStoreError};
use super::repository::TaskStore;
use crate::auth::errors::StoreError;
use crate::auth::repository::CredentialStore;

/// Task workflows for registered accounts.
///
/// Every call is scoped to an owner: a task belonging to someone else is
/// reported as `TaskNotFound`, same as a missing one.
pub struct TaskService<T: ?Sized, S: ?Sized> {
    tasks: Arc<T>,
    accounts: Arc<S>,
}

impl<T, S> TaskService<T, S>
where
    T: TaskStore + ?Sized,
    S: CredentialStore + ?Sized,
{
    pub fn new(tasks: Arc<T>, accounts: Arc<S>) -> Self { Self { tasks, accounts } }

    /// Create an open task for `owner_id`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{domain::NewAccount, repository::CredentialStore, repo::memory::InMemoryCredentialStore};
    /// use service::tasks::{TaskService, errors::TaskError, repo::memory::InMemoryTaskStore};
    ///
    /// let accounts = Arc::new(InMemoryCredentialStore::new());
    /// let owner = tokio_test::block_on(accounts.insert(NewAccount { username: "JohnDoe".into(), secret_hash: "h".into() })).unwrap();
    /// let svc = TaskService::new(Arc::new(InMemoryTaskStore::new()), accounts);
    ///
    /// let task = tokio_test::block_on(svc.add_task(owner.id, "buy milk")).unwrap();
    /// assert!(!task.is_completed);
    /// assert!(matches!(tokio_test::block_on(svc.add_task(uuid::Uuid::new_v4(), "x")), Err(TaskError::UserNotFound)));
    /// ```
    #[instrument(skip(self, content))]
    pub async fn add_task(&self, owner_id: Uuid, content: &str) -> Result<Task, TaskError> {
        match self.accounts.find_by_id(owner_id).await {
            Ok(_) => {}
            Err(StoreError::NotFound) => {
                debug!("unknown task owner");
                return Err(TaskError::UserNotFound);
            }
            Err(e) => return Err(internal(e)),
        }

        let new_task = NewTask { owner_id, content: content.to_string() };
        match self.tasks.insert(new_task).await {
            Ok(task) => {
                info!(task_id = %task.id, "task_added");
                Ok(task)
            }
            Err(TaskStoreError::OwnerNotFound) => Err(TaskError::UserNotFound),
            Err(e) => Err(internal(e)),
        }
    }

    /// Flip the completion flag of an owned task and return the new state.
    #[instrument(skip(self))]
    pub async fn change_complete_status(&self, owner_id: Uuid, task_id: Uuid) -> Result<Task, TaskError> {
        let mut task = self.owned(owner_id, task_id).await?;
        task.is_completed = !task.is_completed;
        match self.tasks.update(&task).await {
            Ok(()) => {
                info!(is_completed = task.is_completed, "task_status_changed");
                Ok(task)
            }
            Err(TaskStoreError::NotFound) => Err(TaskError::TaskNotFound),
            Err(e) => Err(internal(e)),
        }
    }

    /// Tasks of `owner_id`; an unknown owner simply has none.
    #[instrument(skip(self))]
    pub async fn get_user_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, TaskError> {
        self.tasks.find_by_owner(owner_id).await.map_err(internal)
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), TaskError> {
        self.owned(owner_id, task_id).await?;
        match self.tasks.delete_by_id(task_id).await {
            Ok(()) => {
                info!("task_deleted");
                Ok(())
            }
            Err(TaskStoreError::NotFound) => Err(TaskError::TaskNotFound),
            Err(e) => Err(internal(e)),
        }
    }

    async fn owned(&self, owner_id: Uuid, task_id: Uuid) -> Result<Task, TaskError> {
        match self.tasks.find_by_id(task_id).await {
            Ok(task) if task.owner_id == owner_id => Ok(task),
            Ok(_) => {
                debug!("task belongs to another account");
                Err(TaskError::TaskNotFound)
            }
            Err(TaskStoreError::NotFound) => Err(TaskError::TaskNotFound),
            Err(e) => Err(internal(e)),
        }
    }
}

fn internal(e: impl std::fmt::Display) -> TaskError {
    error!(error = %e, "task storage failure");
    TaskError::Internal(e.to_string())
}
