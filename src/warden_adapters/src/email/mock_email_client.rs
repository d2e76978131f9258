use std::sync::Arc;
use tokio::sync::RwLock;

use warden_core::EmailClient;

/// An email the mock client "delivered".
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client for development and tests: records every message instead of
/// delivering it. Real delivery (SMTP, a cloud mail API) lives behind the
/// same port and is deployment-specific.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        tracing::debug!(recipient, subject, "recording outgoing email");
        self.sent.write().await.push(SentEmail {
            recipient: recipient.to_owned(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}
