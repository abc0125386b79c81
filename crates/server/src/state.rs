use std::sync::Arc;

use service::auth::{hasher::PasswordHasher, repository::CredentialStore, AuthService};
use service::tasks::{repository::TaskStore, TaskService};

pub type SharedAuthService = Arc<AuthService<dyn CredentialStore, dyn PasswordHasher>>;
pub type SharedTaskService = Arc<TaskService<dyn TaskStore, dyn CredentialStore>>;

#[derive(Clone)]
pub struct ServerState {
    pub auth: SharedAuthService,
    pub tasks: SharedTaskService,
}

impl ServerState {
    pub fn new(
        accounts: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&accounts), hasher)),
            tasks: Arc::new(TaskService::new(tasks, accounts)),
        }
    }
}
