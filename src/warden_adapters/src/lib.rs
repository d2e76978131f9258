pub mod config;
pub mod email;
pub mod persistence;
pub mod security;
pub mod transport;

pub use config::settings::Settings;
pub use email::mock_email_client::{MockEmailClient, SentEmail};
pub use persistence::{
    in_memory_session_store::InMemorySessionStore, in_memory_user_store::InMemoryUserStore,
    in_memory_verification_token_store::InMemoryVerificationTokenStore,
};
pub use security::argon2_hasher::Argon2PasswordHasher;
pub use transport::in_memory_transport::{InMemoryEventTransport, SentRecord};
