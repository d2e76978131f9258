use secrecy::Secret;
use serde::Deserialize;

/// Service configuration, loaded from defaults, an optional `warden` config
/// file, and `WARDEN__`-prefixed environment variables, in that order of
/// precedence (later sources win).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub events: EventSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Optional session time-to-live in seconds. Absent by default: tokens
    /// then live until revoked, which matches the documented behavior of
    /// the token store. Set it to bound session lifetime.
    #[serde(default)]
    pub session_ttl_seconds: Option<u64>,
    /// Seed an initial `superadmin` account at startup when none exists.
    pub seed_super_admin: bool,
    pub super_admin_password: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSettings {
    pub user_events_topic: String,
    pub admin_events_topic: String,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // A missing .env file is fine; environment variables still apply.
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("auth.seed_super_admin", true)?
            .set_default("auth.super_admin_password", "superadmin123")?
            .set_default("events.user_events_topic", "user-events")?
            .set_default("events.admin_events_topic", "admin-events")?
            .add_source(config::File::with_name("warden").required(false))
            .add_source(config::Environment::with_prefix("WARDEN").separator("__"))
            .build()?
            .try_deserialize()
    }
}
