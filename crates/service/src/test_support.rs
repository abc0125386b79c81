#![cfg(test)]
use models::db::connect_sqlite_memory;

use crate::auth::repo::seaorm::SeaOrmCredentialStore;
use crate::tasks::repo::seaorm::SeaOrmTaskStore;

/// Fresh durable store over an in-memory SQLite database with migrations applied.
pub async fn sqlite_store() -> Result<SeaOrmCredentialStore, anyhow::Error> {
    let db = connect_sqlite_memory().await?;
    Ok(SeaOrmCredentialStore::new(db))
}

/// Credential and task stores sharing one in-memory SQLite database.
pub async fn sqlite_stores() -> Result<(SeaOrmCredentialStore, SeaOrmTaskStore), anyhow::Error> {
    let db = connect_sqlite_memory().await?;
    Ok((SeaOrmCredentialStore::new(db.clone()), SeaOrmTaskStore::new(db)))
}
