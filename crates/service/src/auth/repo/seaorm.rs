use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::{errors::ModelError, users};

use crate::auth::domain::{Account, NewAccount};
use crate::auth::errors::StoreError;
use crate::auth::repository::CredentialStore;

/// Durable store over the `users` table. Uniqueness is enforced by the
/// database index, so concurrent inserts race safely.
pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

impl SeaOrmCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_account(m: users::Model) -> Account {
    Account { id: m.id, username: m.username, secret_hash: m.password_hash }
}

fn store_error(e: ModelError) -> StoreError {
    match e {
        ModelError::UniqueViolation(_) => StoreError::DuplicateUsername,
        ModelError::Validation(msg) => StoreError::Invalid(msg),
        ModelError::NotFound => StoreError::NotFound,
        ModelError::ForeignKeyViolation(msg) | ModelError::Db(msg) => StoreError::Unavailable(msg),
    }
}

#[async_trait::async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Account, StoreError> {
        users::find_by_username(&self.db, username)
            .await
            .map_err(store_error)?
            .map(to_account)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Account, StoreError> {
        users::find_by_id(&self.db, id)
            .await
            .map_err(store_error)?
            .map(to_account)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        users::create(&self.db, &account.username, &account.secret_hash)
            .await
            .map(to_account)
            .map_err(store_error)
    }
}
