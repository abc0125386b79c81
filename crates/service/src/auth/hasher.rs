use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use super::errors::HashError;

/// One-way hashing of raw secrets.
///
/// Both calls are CPU-bound and may be slow on purpose; async callers should
/// run them on the blocking pool.
pub trait PasswordHasher: Send + Sync {
    /// Hash `secret` with a fresh salt. Two calls with the same secret give
    /// different strings.
    fn hash(&self, secret: &str) -> Result<String, HashError>;

    /// `Ok(false)` for a well-formed hash produced from another secret;
    /// `Err(HashError::Format)` when `hash` cannot be parsed.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashError>;
}

/// Argon2id hasher emitting PHC strings.
///
/// Verification uses the parameters embedded in the stored hash, so
/// changing the cost settings does not invalidate existing accounts.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self { Self::default() }

    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::Params(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }

    pub fn from_config(cfg: &configs::HashingConfig) -> Result<Self, HashError> {
        Self::with_params(
            cfg.memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            cfg.iterations.unwrap_or(Params::DEFAULT_T_COST),
            cfg.parallelism.unwrap_or(Params::DEFAULT_P_COST),
        )
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, secret: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashError::Hashing(e.to_string()))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash).map_err(|e| HashError::Format(e.to_string()))?;
        match self.argon.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Format(e.to_string())),
        }
    }
}

/// Cheap hasher for tests and doc examples.
pub mod mock {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    /// Produces `fake$<salt>$<secret>`; the salt is a per-instance counter so
    /// repeated hashes of one secret still differ.
    #[derive(Default)]
    pub struct FakePasswordHasher {
        counter: AtomicU64,
    }

    impl PasswordHasher for FakePasswordHasher {
        fn hash(&self, secret: &str) -> Result<String, HashError> {
            let salt = self.counter.fetch_add(1, Ordering::Relaxed);
            Ok(format!("fake${salt}${secret}"))
        }

        fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashError> {
            let (_salt, raw) = hash
                .strip_prefix("fake$")
                .and_then(|rest| rest.split_once('$'))
                .ok_or_else(|| HashError::Format("not a fake hash".into()))?;
            Ok(raw == secret)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::FakePasswordHasher;
    use super::*;

    fn cheap_argon() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(1024, 1, 1).expect("valid params")
    }

    #[test]
    fn same_secret_hashes_differently_and_verifies_both() {
        let hasher = cheap_argon();
        let h1 = hasher.hash("somepassw").unwrap();
        let h2 = hasher.hash("somepassw").unwrap();

        assert_ne!(h1, h2);
        assert!(h1.starts_with("$argon2id$"));
        assert!(hasher.verify("somepassw", &h1).unwrap());
        assert!(hasher.verify("somepassw", &h2).unwrap());
    }

    #[test]
    fn wrong_secret_is_false_not_error() {
        let hasher = cheap_argon();
        let hash = hasher.hash("somepassw").unwrap();
        assert_eq!(hasher.verify("Somepassw", &hash), Ok(false));
    }

    #[test]
    fn malformed_hash_is_format_error() {
        let hasher = cheap_argon();
        assert!(matches!(hasher.verify("x", "not-a-phc-string"), Err(HashError::Format(_))));
    }

    #[test]
    fn verifies_hashes_made_with_other_params() {
        let old = cheap_argon();
        let hash = old.hash("rotate-me").unwrap();

        let newer = Argon2PasswordHasher::with_params(2048, 2, 1).unwrap();
        assert!(newer.verify("rotate-me", &hash).unwrap());
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(matches!(Argon2PasswordHasher::with_params(1024, 0, 1), Err(HashError::Params(_))));
    }

    #[test]
    fn from_config_fills_defaults() {
        let cfg = configs::HashingConfig { memory_kib: Some(1024), iterations: Some(1), parallelism: None };
        let hasher = Argon2PasswordHasher::from_config(&cfg).unwrap();
        let hash = hasher.hash("pw").unwrap();
        assert!(hash.contains("m=1024,t=1,p=1"));
    }

    #[test]
    fn fake_hasher_is_salted_per_call() {
        let hasher = FakePasswordHasher::default();
        let h1 = hasher.hash("johndoe").unwrap();
        let h2 = hasher.hash("johndoe").unwrap();

        assert_ne!(h1, h2);
        assert!(hasher.verify("johndoe", &h1).unwrap());
        assert!(hasher.verify("johndoe", &h2).unwrap());
        assert!(!hasher.verify("wrong", &h1).unwrap());
        assert!(hasher.verify("johndoe", "johndoehashed").is_err());
    }
}
