use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use warden_core::{NewUser, User, UserId, UserStore, UserStoreError};

/// In-memory user store. Assigns sequential ids starting at 1 and enforces
/// unique usernames and profile emails.
#[derive(Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(UserStoreError::UsernameTaken);
        }
        if users.values().any(|u| u.profile.email == user.profile.email) {
            return Err(UserStoreError::EmailTaken);
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = user.into_user(id);
        users.insert(id.value(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id.value()) {
            return Err(UserStoreError::UserNotFound);
        }
        users.insert(user.id.value(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id.value()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.profile.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        users
            .remove(&id.value())
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}
