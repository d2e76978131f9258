//! # Warden - User Management Service Library
//!
//! This is a facade crate that re-exports the public APIs of the warden
//! workspace crates. Use it to get access to the whole service in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Role`, `User`, `Profile`, the domain events
//! - **Port traits**: `UserStore`, `SessionStore`, `VerificationTokenStore`,
//!   `EmailClient`, `PasswordHasher`, `EventTransport`
//! - **Use cases**: `LoginUseCase`, `LogoutUseCase`, `SignUpUseCase`, the
//!   admin use cases, and the `EventPublisher`
//! - **Adapters**: the in-memory stores, `Argon2PasswordHasher`,
//!   `MockEmailClient`, `InMemoryEventTransport`, `Settings`
//! - **Service**: `UserManagementService` - the assembled router

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, ports, and the authorization decision chain
pub mod core {
    pub use warden_core::*;
}

// Re-export most commonly used core types at the root level
pub use warden_core::{
    AccessError, AdminCreatedEvent, NewUser, Profile, RequiredRoles, Role, User,
    UserCreatedEvent, UserId, UserRoleChangedEvent, authorize,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use warden_core::ports::repositories::*;
    pub use warden_core::ports::services::*;
}

// Re-export port traits at root level
pub use warden_core::{
    EmailClient, EventTransport, PasswordHasher, SessionStore, UserStore, UserStoreError,
    VerificationTokenStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases and the event publisher
pub mod use_cases {
    pub use warden_application::*;
}

// Re-export use cases at root level
pub use warden_application::{
    ChangePasswordUseCase, ChangeUserRoleUseCase, CreateManagedUserUseCase, EventPublisher,
    EventTopics, ForgotPasswordUseCase, LoginUseCase, LogoutUseCase, ResetPasswordUseCase,
    SignUpUseCase, VerificationTokens, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use warden_adapters::email::*;
    }

    /// Password hashing
    pub mod security {
        pub use warden_adapters::security::*;
    }

    /// Event transport implementations
    pub mod transport {
        pub use warden_adapters::transport::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use warden_adapters::{
    Argon2PasswordHasher, InMemoryEventTransport, InMemorySessionStore, InMemoryUserStore,
    InMemoryVerificationTokenStore, MockEmailClient, Settings,
};

// ============================================================================
// HTTP Layer
// ============================================================================

/// Axum routes, middleware, and error mapping
pub mod http {
    pub use warden_axum::*;
}

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

/// Assembled user management service
pub use warden_service::{ADMIN_ROLES, SUPER_ADMIN_ONLY, UserManagementService, seed_super_admin};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use tokio;
