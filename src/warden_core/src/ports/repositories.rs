use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserId};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Entity store for user accounts.
///
/// The `find_*` lookups report absence as `Ok(None)` rather than an error so
/// callers can distinguish "not there" from a failing store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new account, assigning its id. Fails when the username or
    /// profile email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError>;
    /// Replaces the stored account with the same id.
    async fn update(&self, user: User) -> Result<User, UserStoreError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;
    async fn delete(&self, id: UserId) -> Result<(), UserStoreError>;
}

/// Store for active bearer session tokens.
///
/// One mapping per token string; a user may hold any number of concurrent
/// tokens. Implementations must make each operation individually atomic and
/// safe under concurrent callers - no external locking. Tokens stay valid
/// until revoked (an implementation may additionally enforce a configured
/// time-to-live, reporting aged-out tokens as absent).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Generates a token unique within the store's lifetime, records the
    /// mapping to `username`, and returns the token.
    async fn issue(&self, username: &str) -> String;
    /// True iff a live mapping exists for exactly this token string.
    async fn validate(&self, token: &str) -> bool;
    /// The owning username, or `None` for unknown tokens.
    async fn resolve_owner(&self, token: &str) -> Option<String>;
    /// Atomically removes the mapping, returning the previous owner so
    /// callers can tell "revoked" apart from "was already invalid".
    async fn revoke(&self, token: &str) -> Option<String>;
}

/// What a verification token is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationKind {
    EmailVerification,
    PasswordReset,
}

/// A single-use, expiring token mailed to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationToken {
    pub token: String,
    pub user_id: UserId,
    pub kind: VerificationKind,
    pub expires_at: NaiveDateTime,
    pub used: bool,
}

impl VerificationToken {
    pub fn is_valid(&self, now: NaiveDateTime) -> bool {
        !self.used && now < self.expires_at
    }
}

#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    /// Stores the token, superseding any earlier token of the same kind for
    /// the same user.
    async fn put(&self, token: VerificationToken);
    async fn find(&self, token: &str) -> Option<VerificationToken>;
    async fn mark_used(&self, token: &str);
}
