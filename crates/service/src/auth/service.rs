use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::domain::{Account, NewAccount};
use super::errors::{AuthError, HashError, StoreError};
use super::hasher::PasswordHasher;
use super::repository::CredentialStore;

/// Auth business service independent of web framework.
///
/// Composes a credential store and a password hasher. Store outcomes are
/// folded into `RegistrationFailed` / `AuthenticationFailed` so callers
/// cannot tell an unknown username from a wrong password.
pub struct AuthService<S: ?Sized, H: ?Sized> {
    store: Arc<S>,
    hasher: Arc<H>,
}

impl<S, H> AuthService<S, H>
where
    S: CredentialStore + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, hasher: Arc<H>) -> Self { Self { store, hasher } }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Arc<S> { &self.store }

    /// Register a new account with a hashed secret.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::AuthService;
    /// use service::auth::hasher::mock::FakePasswordHasher;
    /// use service::auth::repo::memory::InMemoryCredentialStore;
    ///
    /// let svc = AuthService::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(FakePasswordHasher::default()));
    /// let account = tokio_test::block_on(svc.register("JohnDoe", "johndoe")).unwrap();
    /// assert_eq!(account.username, "JohnDoe");
    /// assert!(tokio_test::block_on(svc.register("JohnDoe", "other")).is_err());
    /// ```
    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn register(&self, username: &str, secret: &str) -> Result<Account, AuthError> {
        if username.trim().is_empty() {
            debug!("empty username rejected");
            return Err(AuthError::RegistrationFailed);
        }

        let secret_hash = self.hash(secret).await?;
        let new_account = NewAccount { username: username.to_string(), secret_hash };
        match self.store.insert(new_account).await {
            Ok(account) => {
                info!(account_id = %account.id, "account_registered");
                Ok(account)
            }
            Err(StoreError::DuplicateUsername) => {
                debug!("username already taken");
                Err(AuthError::RegistrationFailed)
            }
            Err(StoreError::Invalid(reason)) => {
                debug!(%reason, "store rejected account");
                Err(AuthError::RegistrationFailed)
            }
            Err(e) => Err(internal(e)),
        }
    }

    /// Authenticate a username/secret pair and return the stored account.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, errors::AuthError};
    /// use service::auth::hasher::mock::FakePasswordHasher;
    /// use service::auth::repo::memory::InMemoryCredentialStore;
    ///
    /// let svc = AuthService::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(FakePasswordHasher::default()));
    /// let registered = tokio_test::block_on(svc.register("JohnDoe", "johndoe")).unwrap();
    /// let account = tokio_test::block_on(svc.authenticate("JohnDoe", "johndoe")).unwrap();
    /// assert_eq!(account.id, registered.id);
    /// assert!(matches!(tokio_test::block_on(svc.authenticate("Ghost", "x")), Err(AuthError::AuthenticationFailed)));
    /// ```
    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn authenticate(&self, username: &str, secret: &str) -> Result<Account, AuthError> {
        if username.trim().is_empty() {
            debug!("empty username rejected");
            return Err(AuthError::AuthenticationFailed);
        }

        let account = match self.store.find_by_username(username).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                debug!("unknown username");
                return Err(AuthError::AuthenticationFailed);
            }
            Err(StoreError::Invalid(reason)) => {
                debug!(%reason, "store rejected lookup");
                return Err(AuthError::AuthenticationFailed);
            }
            Err(e) => return Err(internal(e)),
        };

        if !self.verify(secret, &account.secret_hash).await? {
            debug!(account_id = %account.id, "password mismatch");
            return Err(AuthError::AuthenticationFailed);
        }

        info!(account_id = %account.id, "account_authenticated");
        Ok(account)
    }

    async fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_owned();
        run_blocking(move || hasher.hash(&secret)).await
    }

    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_owned();
        let hash = hash.to_owned();
        run_blocking(move || hasher.verify(&secret, &hash)).await.map_err(|e| {
            if let AuthError::HashFormat(reason) = &e {
                error!(%reason, "stored password hash is corrupt");
            }
            e
        })
    }
}

/// Run hasher work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, HashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!(error = %e, "hashing task failed");
            AuthError::Internal(e.to_string())
        })?
        .map_err(AuthError::from)
}

fn internal(e: StoreError) -> AuthError {
    error!(error = %e, "credential store failure");
    AuthError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::auth::hasher::{mock::FakePasswordHasher, Argon2PasswordHasher};
    use crate::auth::repo::memory::InMemoryCredentialStore;
    use crate::test_support::sqlite_store;

    type MemService = AuthService<InMemoryCredentialStore, FakePasswordHasher>;

    fn svc() -> MemService {
        AuthService::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(FakePasswordHasher::default()))
    }

    async fn seeded() -> MemService {
        let svc = svc();
        for (name, pw) in [("JohnDoe", "johndoe"), ("JaneDoe", "janedoe"), ("Bipki", "bipki")] {
            svc.register(name, pw).await.unwrap();
        }
        svc
    }

    #[tokio::test]
    async fn register_returns_account_with_generated_id() {
        let svc = seeded().await;
        let account = svc.register("David", "passw").await.unwrap();

        assert_eq!(account.username, "David");
        assert_ne!(account.id, uuid::Uuid::nil());
        assert_ne!(account.secret_hash, "passw");
        assert!(account.secret_hash.starts_with("fake$"));
    }

    #[tokio::test]
    async fn register_duplicate_fails_and_keeps_one_account() {
        let svc = seeded().await;
        let before = svc.store().len().await;

        let err = svc.register("JohnDoe", "passw").await.unwrap_err();
        assert!(matches!(err, AuthError::RegistrationFailed));
        assert_eq!(svc.store().len().await, before);
        // the first secret still works
        svc.authenticate("JohnDoe", "johndoe").await.unwrap();
    }

    #[tokio::test]
    async fn register_empty_username_fails() {
        let svc = svc();
        assert!(matches!(svc.register("  ", "pw").await, Err(AuthError::RegistrationFailed)));
        assert!(svc.store().is_empty().await);
    }

    #[tokio::test]
    async fn authenticate_success_returns_stored_account() {
        let svc = svc();
        let registered = svc.register("JohnDoe", "johndoe").await.unwrap();
        let account = svc.authenticate("JohnDoe", "johndoe").await.unwrap();

        assert_eq!(account.id, registered.id);
        assert_eq!(account.username, "JohnDoe");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let svc = seeded().await;

        let wrong = svc.authenticate("JohnDoe", "wrongpassw").await.unwrap_err();
        let unknown = svc.authenticate("nevermind", "what").await.unwrap_err();

        assert!(matches!(wrong, AuthError::AuthenticationFailed));
        assert!(matches!(unknown, AuthError::AuthenticationFailed));
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.code(), unknown.code());
    }

    #[tokio::test]
    async fn concrete_scenario() {
        let svc = svc();

        let john = svc.register("JohnDoe", "johndoe").await.unwrap();
        assert_eq!(john.username, "JohnDoe");
        assert_eq!(svc.authenticate("JohnDoe", "johndoe").await.unwrap().id, john.id);
        assert!(matches!(svc.authenticate("JohnDoe", "wrong").await, Err(AuthError::AuthenticationFailed)));
        assert!(matches!(svc.authenticate("Ghost", "x").await, Err(AuthError::AuthenticationFailed)));
        assert!(matches!(svc.register("JohnDoe", "other").await, Err(AuthError::RegistrationFailed)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_yield_one_success() {
        let svc = Arc::new(svc());
        let mut handles = Vec::new();
        for i in 0..16 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.register("racer", &format!("pw{i}")).await }));
        }

        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AuthError::RegistrationFailed) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(svc.store().len().await, 1);
    }

    #[tokio::test]
    async fn argon2_round_trip_with_durable_store() -> anyhow::Result<()> {
        let store = Arc::new(sqlite_store().await?);
        let hasher = Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1)?);
        let svc = AuthService::new(store, hasher);

        let john = svc.register("JohnDoe", "johndoe").await?;
        assert!(john.secret_hash.starts_with("$argon2id$"));
        assert_eq!(svc.authenticate("JohnDoe", "johndoe").await?.id, john.id);
        assert!(matches!(svc.authenticate("JohnDoe", "wrong").await, Err(AuthError::AuthenticationFailed)));
        assert!(matches!(svc.authenticate("Ghost", "x").await, Err(AuthError::AuthenticationFailed)));
        assert!(matches!(svc.register("JohnDoe", "other").await, Err(AuthError::RegistrationFailed)));
        Ok(())
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(FakePasswordHasher::default());
        let svc = AuthService::new(store, hasher);

        svc.register("JaneDoe", "janedoe").await.unwrap();
        assert_eq!(svc.authenticate("JaneDoe", "janedoe").await.unwrap().username, "JaneDoe");
    }

    /// Store returning fixed records or failures.
    struct StubStore {
        find: Result<Account, StoreError>,
        insert: Result<Account, StoreError>,
    }

    #[async_trait]
    impl CredentialStore for StubStore {
        async fn find_by_username(&self, _username: &str) -> Result<Account, StoreError> {
            self.find.clone()
        }

        async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Account, StoreError> {
            self.find.clone()
        }

        async fn insert(&self, _account: NewAccount) -> Result<Account, StoreError> {
            self.insert.clone()
        }
    }

    fn stub(find: Result<Account, StoreError>, insert: Result<Account, StoreError>) -> AuthService<StubStore, FakePasswordHasher> {
        AuthService::new(Arc::new(StubStore { find, insert }), Arc::new(FakePasswordHasher::default()))
    }

    #[tokio::test]
    async fn store_outage_is_internal_not_auth_failure() {
        let down = || Err(StoreError::Unavailable("connection refused".into()));
        let svc = stub(down(), down());

        assert!(matches!(svc.register("bob", "pw").await, Err(AuthError::Internal(_))));
        assert!(matches!(svc.authenticate("bob", "pw").await, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_hash_format_error() {
        let corrupt = Account { id: uuid::Uuid::new_v4(), username: "bob".into(), secret_hash: "garbage".into() };
        let svc = stub(Ok(corrupt), Err(StoreError::DuplicateUsername));

        let err = svc.authenticate("bob", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::HashFormat(_)));
        assert_eq!(err.code(), 1101);
    }

    #[tokio::test]
    async fn store_rejection_maps_to_registration_failed() {
        let svc = stub(Err(StoreError::NotFound), Err(StoreError::Invalid("username required".into())));
        assert!(matches!(svc.register("bob", "pw").await, Err(AuthError::RegistrationFailed)));
    }
}
