use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use warden_core::{VerificationToken, VerificationTokenStore};

/// In-memory store for mailed verification tokens.
#[derive(Clone, Default)]
pub struct InMemoryVerificationTokenStore {
    tokens: Arc<RwLock<HashMap<String, VerificationToken>>>,
}

impl InMemoryVerificationTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for InMemoryVerificationTokenStore {
    async fn put(&self, token: VerificationToken) {
        let mut tokens = self.tokens.write().await;
        // A fresh token supersedes any earlier one of the same kind for the
        // same user.
        tokens.retain(|_, t| !(t.user_id == token.user_id && t.kind == token.kind));
        tokens.insert(token.token.clone(), token);
    }

    async fn find(&self, token: &str) -> Option<VerificationToken> {
        let tokens = self.tokens.read().await;
        tokens.get(token).cloned()
    }

    async fn mark_used(&self, token: &str) {
        let mut tokens = self.tokens.write().await;
        if let Some(entry) = tokens.get_mut(token) {
            entry.used = true;
        }
    }
}
