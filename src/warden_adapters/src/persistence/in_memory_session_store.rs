use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

use warden_core::SessionStore;

#[derive(Debug, Clone)]
struct Session {
    username: String,
    issued_at: Instant,
}

/// Process-lifetime bearer token store backed by a concurrent map.
///
/// Tokens embed the owner's username, the issuance timestamp, and a
/// process-wide counter, so concurrent issuance within the same millisecond
/// still yields distinct tokens. Without a TTL the store is unbounded and
/// tokens only die on revocation; [`with_ttl`](Self::with_ttl) turns on lazy
/// expiry, under which an aged-out token reads as absent everywhere.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, Session>>,
    counter: Arc<AtomicU64>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    fn is_expired(&self, session: &Session) -> bool {
        match self.ttl {
            Some(ttl) => session.issued_at.elapsed() >= ttl,
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, username: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("TOKEN_{username}_{millis}_{seq}");

        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_owned(),
                issued_at: Instant::now(),
            },
        );
        token
    }

    async fn validate(&self, token: &str) -> bool {
        // The shard guard must be dropped before removing, so the expiry
        // check happens in two steps.
        let expired = match self.sessions.get(token) {
            Some(session) => self.is_expired(&session),
            None => return false,
        };
        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    async fn resolve_owner(&self, token: &str) -> Option<String> {
        let (expired, username) = match self.sessions.get(token) {
            Some(session) => (self.is_expired(&session), session.username.clone()),
            None => return None,
        };
        if expired {
            self.sessions.remove(token);
            return None;
        }
        Some(username)
    }

    async fn revoke(&self, token: &str) -> Option<String> {
        let (_, session) = self.sessions.remove(token)?;
        if self.is_expired(&session) {
            return None;
        }
        Some(session.username)
    }
}
