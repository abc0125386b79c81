use thiserror::Error;

/// Store-level outcomes. These never leave `AuthService` unmapped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("account not found")]
    NotFound,
    #[error("username already taken")]
    DuplicateUsername,
    #[error("record rejected by store: {0}")]
    Invalid(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Password hashing failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("malformed password hash: {0}")]
    Format(String),
    #[error("hashing failed: {0}")]
    Hashing(String),
    #[error("invalid hashing parameters: {0}")]
    Params(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("registration failed")]
    RegistrationFailed,
    #[error("invalid credentials")]
    AuthenticationFailed,
    #[error("stored password hash is malformed: {0}")]
    HashFormat(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::RegistrationFailed => 1002,
            AuthError::AuthenticationFailed => 1004,
            AuthError::HashFormat(_) => 1101,
            AuthError::Internal(_) => 1200,
        }
    }
}

impl From<HashError> for AuthError {
    fn from(e: HashError) -> Self {
        match e {
            HashError::Format(msg) => AuthError::HashFormat(msg),
            other => AuthError::Internal(other.to_string()),
        }
    }
}
