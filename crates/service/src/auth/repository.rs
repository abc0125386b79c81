use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Account, NewAccount};
use super::errors::StoreError;

/// Persistence abstraction for credential records.
///
/// Implementations own the only shared mutable state in the auth flow and
/// must make the duplicate check and the insert atomic: concurrent inserts
/// of one username leave at most one account behind.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `StoreError::NotFound` when no account has this username.
    async fn find_by_username(&self, username: &str) -> Result<Account, StoreError>;

    /// `StoreError::NotFound` when no account has this id.
    async fn find_by_id(&self, id: Uuid) -> Result<Account, StoreError>;

    /// Persist a new account with a freshly generated id;
    /// `StoreError::DuplicateUsername` when the username is taken.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;
}
