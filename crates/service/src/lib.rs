//! Service layer: account registration, credential authentication and
//! per-account tasks.
//! - `auth::domain` holds the account types shared with the transport.
//! - `auth::hasher` and `auth::repository` are the two seams `AuthService` composes.
//! - Store failures are translated into auth outcomes before leaving the service.
//! - `tasks::TaskService` scopes every task operation to its owning account.

pub mod auth;
pub mod tasks;
#[cfg(test)]
pub mod test_support;
