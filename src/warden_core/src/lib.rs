pub mod authz;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    events::{
        AdminCreatedEvent, DomainEvent, EventEnvelope, UserCreatedEvent, UserRoleChangedEvent,
    },
    role::Role,
    user::{NewUser, Profile, User, UserId},
};

pub use ports::{
    repositories::{
        SessionStore, UserStore, UserStoreError, VerificationKind, VerificationToken,
        VerificationTokenStore,
    },
    services::{
        Delivery, DeliveryFuture, EmailClient, EventTransport, PasswordHashError, PasswordHasher,
        TransportError,
    },
};

pub use authz::{AccessError, RequiredRoles, authorize};
