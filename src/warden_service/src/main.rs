use std::time::Duration;

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use warden_adapters::{
    Argon2PasswordHasher, InMemoryEventTransport, InMemorySessionStore, InMemoryUserStore,
    InMemoryVerificationTokenStore, MockEmailClient, Settings,
};
use warden_application::EventTopics;
use warden_service::{UserManagementService, seed_super_admin};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;

    // Create stores
    let users = InMemoryUserStore::new();
    let sessions = match settings.auth.session_ttl_seconds {
        Some(ttl) => InMemorySessionStore::with_ttl(Duration::from_secs(ttl)),
        None => InMemorySessionStore::new(),
    };
    let verification_tokens = InMemoryVerificationTokenStore::new();
    let hasher = Argon2PasswordHasher::new();

    // Development collaborators; a deployment swaps in real ones behind the
    // same ports.
    let email_client = MockEmailClient::new();
    let transport = InMemoryEventTransport::new();

    if settings.auth.seed_super_admin {
        seed_super_admin(&users, &hasher, &settings.auth.super_admin_password).await?;
    }

    let topics = EventTopics {
        user_events: settings.events.user_events_topic.clone(),
        admin_events: settings.events.admin_events_topic.clone(),
    };

    let service = UserManagementService::new(
        users,
        sessions,
        verification_tokens,
        email_client,
        hasher,
        transport,
        topics,
    );

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!("starting user management service...");
    service.run_standalone(listener, None).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
