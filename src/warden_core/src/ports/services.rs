use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
#[error("Failed to hash password: {0}")]
pub struct PasswordHashError(pub String);

/// Password hashing primitive. Implementations wrap a standard
/// memory-hard hash; plaintext passwords only leave their [`Secret`]
/// wrapper inside these two calls.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &Secret<String>) -> Result<String, PasswordHashError>;
    /// Constant result for malformed stored hashes: `false`.
    fn verify(&self, password: &Secret<String>, password_hash: &str) -> bool;
}

/// Position marker for a delivered record, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The transport refused the send request up front.
    #[error("Send request rejected: {0}")]
    Rejected(String),
    /// The transport accepted the record but later reported that delivery
    /// failed.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Resolves once the transport reports the record delivered or lost.
pub type DeliveryFuture = Pin<Box<dyn Future<Output = Result<Delivery, TransportError>> + Send>>;

/// Messaging transport the event publisher hands records to.
///
/// `send` returns as soon as the transport accepts the record; the returned
/// future completes out of band with the delivery outcome. Implementations
/// must preserve send order per key.
pub trait EventTransport: Send + Sync {
    fn send(&self, topic: &str, key: &str, payload: String)
    -> Result<DeliveryFuture, TransportError>;
}
