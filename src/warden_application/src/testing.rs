//! Shared in-memory mocks for use-case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use warden_core::{
    Delivery, DeliveryFuture, EmailClient, EventTransport, NewUser, PasswordHashError,
    PasswordHasher, Profile, Role, SessionStore, TransportError, User, UserId, UserStore,
    UserStoreError, VerificationToken, VerificationTokenStore,
};

pub(crate) fn profile(email: &str) -> Profile {
    Profile {
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        email: email.to_owned(),
        phone_number: "555-0100".to_owned(),
        address: "1 Test Street".to_owned(),
    }
}

pub(crate) fn active_user(id: u64, username: &str, password: &str, role: Role) -> User {
    User {
        id: UserId::new(id),
        username: username.to_owned(),
        password_hash: PlainHasher::hash_str(password),
        profile: profile(&format!("{username}@example.com")),
        active: true,
        email_verified: true,
        role,
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockUserStore {
    users: Arc<Mutex<HashMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
}

impl MockUserStore {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub(crate) fn with_users(users: Vec<User>) -> Self {
        let max_id = users.iter().map(|u| u.id.value()).max().unwrap_or(0);
        let map = users.into_iter().map(|u| (u.id.value(), u)).collect();
        Self {
            users: Arc::new(Mutex::new(map)),
            next_id: Arc::new(AtomicU64::new(max_id + 1)),
        }
    }

    pub(crate) fn get(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.lock().unwrap();
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
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id.value()) {
            return Err(UserStoreError::UserNotFound);
        }
        users.insert(user.id.value(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.lock().unwrap().get(&id.value()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        Ok(self.get(username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.profile.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserStoreError> {
        self.users
            .lock()
            .unwrap()
            .remove(&id.value())
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<String, String>>>,
    counter: Arc<AtomicU64>,
}

impl MockSessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn issue(&self, username: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("TOKEN_{username}_{seq}");
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), username.to_owned());
        token
    }

    async fn validate(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(token)
    }

    async fn resolve_owner(&self, token: &str) -> Option<String> {
        self.sessions.lock().unwrap().get(token).cloned()
    }

    async fn revoke(&self, token: &str) -> Option<String> {
        self.sessions.lock().unwrap().remove(token)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockVerificationTokenStore {
    tokens: Arc<Mutex<HashMap<String, VerificationToken>>>,
}

impl MockVerificationTokenStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationTokenStore for MockVerificationTokenStore {
    async fn put(&self, token: VerificationToken) {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|_, t| !(t.user_id == token.user_id && t.kind == token.kind));
        tokens.insert(token.token.clone(), token);
    }

    async fn find(&self, token: &str) -> Option<VerificationToken> {
        self.tokens.lock().unwrap().get(token).cloned()
    }

    async fn mark_used(&self, token: &str) {
        if let Some(entry) = self.tokens.lock().unwrap().get_mut(token) {
            entry.used = true;
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingEmailClient {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingEmailClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::Relaxed) {
            return Err("smtp unavailable".to_owned());
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_owned(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}

/// Reversible "hash" so tests can assert on stored credentials without
/// paying for argon2.
#[derive(Clone, Default)]
pub(crate) struct PlainHasher;

impl PlainHasher {
    pub(crate) fn hash_str(password: &str) -> String {
        format!("plain:{password}")
    }
}

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &Secret<String>) -> Result<String, PasswordHashError> {
        Ok(Self::hash_str(password.expose_secret()))
    }

    fn verify(&self, password: &Secret<String>, password_hash: &str) -> bool {
        Self::hash_str(password.expose_secret()) == password_hash
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SentRecord {
    pub topic: String,
    pub key: String,
    pub payload: String,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentRecord>>>,
    reject: Arc<AtomicBool>,
    fail_delivery: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn reject_sends(&self, reject: bool) {
        self.reject.store(reject, Ordering::Relaxed);
    }

    pub(crate) fn fail_deliveries(&self, fail: bool) {
        self.fail_delivery.store(fail, Ordering::Relaxed);
    }
}

impl EventTransport for RecordingTransport {
    fn send(
        &self,
        topic: &str,
        key: &str,
        payload: String,
    ) -> Result<DeliveryFuture, TransportError> {
        if self.reject.load(Ordering::Relaxed) {
            return Err(TransportError::Rejected("transport unavailable".to_owned()));
        }
        let mut sent = self.sent.lock().unwrap();
        let offset = sent.len() as i64;
        sent.push(SentRecord {
            topic: topic.to_owned(),
            key: key.to_owned(),
            payload,
        });
        let fail = self.fail_delivery.load(Ordering::Relaxed);
        Ok(Box::pin(async move {
            if fail {
                Err(TransportError::DeliveryFailed("broker went away".to_owned()))
            } else {
                Ok(Delivery {
                    partition: 0,
                    offset,
                })
            }
        }))
    }
}
