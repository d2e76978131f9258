use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{role::Role, user::UserId};

/// Fixed `source` value stamped on every event this service emits.
pub const EVENT_SOURCE: &str = "user-management-service";

/// Schema version stamped on every event.
pub const EVENT_SCHEMA_VERSION: &str = "1.0";

pub const USER_CREATED: &str = "USER_CREATED";
pub const ADMIN_CREATED: &str = "ADMIN_CREATED";
pub const USER_ROLE_CHANGED: &str = "USER_ROLE_CHANGED";

/// Wire format for event timestamps: ISO-8601 local date-time with
/// millisecond precision and no offset. Consumers must not assume an
/// embedded timezone.
pub mod event_timestamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Metadata shared by all domain events.
///
/// `event_id` and `timestamp` are assigned exactly once at construction and
/// are never mutated afterwards; events carry no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    event_id: String,
    #[serde(with = "event_timestamp")]
    timestamp: NaiveDateTime,
    event_type: String,
    source: String,
    version: String,
}

impl EventEnvelope {
    fn new(event_type: &str) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().naive_utc(),
            event_type: event_type.to_owned(),
            source: EVENT_SOURCE.to_owned(),
            version: EVENT_SCHEMA_VERSION.to_owned(),
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Implemented by every event type the publisher can emit.
pub trait DomainEvent: Serialize + Send + Sync {
    fn envelope(&self) -> &EventEnvelope;

    fn event_type(&self) -> &str {
        self.envelope().event_type()
    }
}

/// Emitted when an ordinary user account is created through the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedEvent {
    #[serde(flatten)]
    envelope: EventEnvelope,
    user_id: UserId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: Role,
    created_by: String,
    #[serde(with = "event_timestamp")]
    created_at: NaiveDateTime,
}

impl UserCreatedEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
        created_by: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            envelope: EventEnvelope::new(USER_CREATED),
            user_id,
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            created_by: created_by.into(),
            created_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }
}

impl DomainEvent for UserCreatedEvent {
    fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }
}

/// Emitted when an admin account is created; only a super admin can do that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreatedEvent {
    #[serde(flatten)]
    envelope: EventEnvelope,
    admin_id: UserId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: Role,
    created_by: String,
    created_by_role: String,
    #[serde(with = "event_timestamp")]
    created_at: NaiveDateTime,
}

impl AdminCreatedEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        admin_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
        created_by: impl Into<String>,
        created_by_role: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            envelope: EventEnvelope::new(ADMIN_CREATED),
            admin_id,
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            created_by: created_by.into(),
            created_by_role: created_by_role.into(),
            created_at,
        }
    }

    pub fn admin_id(&self) -> UserId {
        self.admin_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_by_role(&self) -> &str {
        &self.created_by_role
    }
}

impl DomainEvent for AdminCreatedEvent {
    fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }
}

/// Emitted when a super admin changes another account's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleChangedEvent {
    #[serde(flatten)]
    envelope: EventEnvelope,
    user_id: UserId,
    username: String,
    previous_role: Role,
    new_role: Role,
    changed_by: String,
    changed_by_role: String,
    #[serde(with = "event_timestamp")]
    changed_at: NaiveDateTime,
}

impl UserRoleChangedEvent {
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        previous_role: Role,
        new_role: Role,
        changed_by: impl Into<String>,
        changed_by_role: impl Into<String>,
        changed_at: NaiveDateTime,
    ) -> Self {
        Self {
            envelope: EventEnvelope::new(USER_ROLE_CHANGED),
            user_id,
            username: username.into(),
            previous_role,
            new_role,
            changed_by: changed_by.into(),
            changed_by_role: changed_by_role.into(),
            changed_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn previous_role(&self) -> Role {
        self.previous_role
    }

    pub fn new_role(&self) -> Role {
        self.new_role
    }

    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }
}

impl DomainEvent for UserRoleChangedEvent {
    fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }
}
