use serde::{Deserialize, Serialize};

use crate::domain::role::Role;

/// Identifier assigned to a user account by the backing store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal details attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

/// A stored user account.
///
/// `password_hash` is the salted PHC-format hash produced by the
/// [`PasswordHasher`](crate::ports::services::PasswordHasher) port; the
/// plaintext password never appears on this type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub profile: Profile,
    pub active: bool,
    pub email_verified: bool,
    pub role: Role,
}

/// A user account that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub profile: Profile,
    pub active: bool,
    pub email_verified: bool,
    pub role: Role,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            profile: self.profile,
            active: self.active,
            email_verified: self.email_verified,
            role: self.role,
        }
    }
}
