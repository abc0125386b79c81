use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Username/secret pair supplied by a caller. Never persisted verbatim.
#[derive(Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Store input: a username and an already hashed secret.
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub secret_hash: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Persisted identity record.
///
/// `secret_hash` is only readable inside this crate and is skipped by both
/// `Serialize` and `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    #[serde(skip)]
    pub(crate) secret_hash: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Outward account shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Uuid,
    pub username: String,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self { id: account.id, username: account.username }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account { id: Uuid::new_v4(), username: "JohnDoe".into(), secret_hash: "$argon2id$secret".into() }
    }

    #[test]
    fn account_never_exposes_hash() {
        let acc = account();
        let json = serde_json::to_value(&acc).expect("serialize");
        assert_eq!(json, serde_json::json!({"id": acc.id, "username": "JohnDoe"}));
        assert!(!format!("{acc:?}").contains("argon2id"));
    }

    #[test]
    fn credential_debug_redacts_secret() {
        let cred = Credential { username: "JohnDoe".into(), secret: "hunter2".into() };
        let dbg = format!("{cred:?}");
        assert!(dbg.contains("JohnDoe"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn credential_reads_password_field() {
        let cred: Credential = serde_json::from_value(serde_json::json!({"username": "JohnDoe", "password": "johndoe"}))
            .expect("deserialize");
        assert_eq!(cred.secret, "johndoe");
    }

    #[test]
    fn view_keeps_id_and_username() {
        let acc = account();
        let view = AccountView::from(acc.clone());
        assert_eq!(view, AccountView { id: acc.id, username: "JohnDoe".into() });
    }
}
