use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::domain::{Account, NewAccount};
use crate::auth::errors::StoreError;
use crate::auth::repository::CredentialStore;

#[derive(Default)]
struct Accounts {
    by_id: HashMap<Uuid, Account>,
    by_username: HashMap<String, Uuid>, // secondary index into by_id
}

/// Per-instance in-memory store; every value starts empty.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Accounts>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Account, StoreError> {
        let accounts = self.inner.read().await;
        accounts
            .by_username
            .get(username)
            .and_then(|id| accounts.by_id.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Account, StoreError> {
        self.inner.read().await.by_id.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        // Check and insert under one write guard.
        let mut guard = self.inner.write().await;
        let accounts = &mut *guard;
        if accounts.by_username.contains_key(&account.username) {
            return Err(StoreError::DuplicateUsername);
        }
        let mut id = Uuid::new_v4();
        while accounts.by_id.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let created = Account { id, username: account.username, secret_hash: account.secret_hash };
        accounts.by_username.insert(created.username.clone(), id);
        accounts.by_id.insert(id, created.clone());
        Ok(created)
    }
}
