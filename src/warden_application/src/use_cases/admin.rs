use chrono::Utc;
use secrecy::Secret;

use warden_core::{
    AdminCreatedEvent, EventTransport, NewUser, PasswordHasher, Profile, Role, User,
    UserCreatedEvent, UserRoleChangedEvent, UserStore,
};

use crate::publisher::{EventPublishError, EventPublisher};

/// Data for an account created through the admin API.
#[derive(Debug)]
pub struct ManagedUserData {
    pub username: String,
    pub password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub role: Role,
}

/// Data for a role-change request.
#[derive(Debug)]
pub struct ChangeRoleData {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminActionError {
    #[error("Only Super Admin can create Admin users")]
    AdminCreationForbidden,
    #[error("Cannot create Super Admin users")]
    SuperAdminCreationForbidden,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Only Super Admin can change user roles")]
    RoleChangeForbidden,
    #[error("Cannot promote users to Super Admin")]
    SuperAdminPromotionForbidden,
    #[error("Cannot change Super Admin role")]
    SuperAdminImmutable,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Publish(#[from] EventPublishError),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for AdminActionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AdminCreationForbidden, Self::AdminCreationForbidden) => true,
            (Self::SuperAdminCreationForbidden, Self::SuperAdminCreationForbidden) => true,
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::RoleChangeForbidden, Self::RoleChangeForbidden) => true,
            (Self::SuperAdminPromotionForbidden, Self::SuperAdminPromotionForbidden) => true,
            (Self::SuperAdminImmutable, Self::SuperAdminImmutable) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::Publish(_), Self::Publish(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Admin account creation. Admin-created accounts skip email verification.
///
/// Permission matrix: an ADMIN actor may create USER accounts; only a
/// SUPER_ADMIN actor may create ADMIN accounts; SUPER_ADMIN accounts are
/// never created through this path.
pub struct CreateManagedUserUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: EventTransport + 'static,
{
    users: U,
    hasher: H,
    publisher: EventPublisher<T>,
}

impl<U, H, T> CreateManagedUserUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: EventTransport + 'static,
{
    pub fn new(users: U, hasher: H, publisher: EventPublisher<T>) -> Self {
        Self {
            users,
            hasher,
            publisher,
        }
    }

    #[tracing::instrument(
        name = "CreateManagedUserUseCase::execute",
        skip_all,
        fields(actor = %actor.username, username = %data.username, role = %data.role)
    )]
    pub async fn execute(&self, actor: &User, data: ManagedUserData) -> Result<User, AdminActionError> {
        if data.role == Role::Admin && actor.role != Role::SuperAdmin {
            return Err(AdminActionError::AdminCreationForbidden);
        }
        if data.role == Role::SuperAdmin {
            return Err(AdminActionError::SuperAdminCreationForbidden);
        }

        if self
            .users
            .find_by_username(&data.username)
            .await
            .map_err(|e| AdminActionError::UnexpectedError(e.to_string()))?
            .is_some()
        {
            return Err(AdminActionError::UsernameTaken);
        }

        if self
            .users
            .find_by_email(&data.email)
            .await
            .map_err(|e| AdminActionError::UnexpectedError(e.to_string()))?
            .is_some()
        {
            return Err(AdminActionError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&data.password)
            .map_err(|e| AdminActionError::UnexpectedError(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser {
                username: data.username,
                password_hash,
                profile: Profile {
                    first_name: data.first_name,
                    last_name: data.last_name,
                    email: data.email,
                    phone_number: data.phone_number,
                    address: data.address,
                },
                active: true,
                // Admin-created users are pre-verified.
                email_verified: true,
                role: data.role,
            })
            .await
            .map_err(|e| match e {
                warden_core::UserStoreError::UsernameTaken => AdminActionError::UsernameTaken,
                warden_core::UserStoreError::EmailTaken => AdminActionError::EmailTaken,
                other => AdminActionError::UnexpectedError(other.to_string()),
            })?;

        tracing::info!(
            username = %user.username,
            role = %user.role,
            created_by = %actor.username,
            "user created by admin"
        );

        if user.role == Role::Admin {
            let event = AdminCreatedEvent::new(
                user.id,
                user.username.clone(),
                user.profile.email.clone(),
                user.profile.first_name.clone(),
                user.profile.last_name.clone(),
                user.role,
                actor.username.clone(),
                actor.role.as_str(),
                Utc::now().naive_utc(),
            );
            self.publisher.publish_admin_created(&event)?;
        } else {
            let event = UserCreatedEvent::new(
                user.id,
                user.username.clone(),
                user.profile.email.clone(),
                user.profile.first_name.clone(),
                user.profile.last_name.clone(),
                user.role,
                actor.username.clone(),
                Utc::now().naive_utc(),
            );
            self.publisher.publish_user_created(&event)?;
        }

        Ok(user)
    }
}

/// Role changes. Only a SUPER_ADMIN actor may change roles, and the
/// SUPER_ADMIN role itself can be neither granted nor taken away.
pub struct ChangeUserRoleUseCase<U, T>
where
    U: UserStore,
    T: EventTransport + 'static,
{
    users: U,
    publisher: EventPublisher<T>,
}

impl<U, T> ChangeUserRoleUseCase<U, T>
where
    U: UserStore,
    T: EventTransport + 'static,
{
    pub fn new(users: U, publisher: EventPublisher<T>) -> Self {
        Self { users, publisher }
    }

    #[tracing::instrument(
        name = "ChangeUserRoleUseCase::execute",
        skip_all,
        fields(actor = %actor.username, username = %data.username, role = %data.role)
    )]
    pub async fn execute(&self, actor: &User, data: ChangeRoleData) -> Result<User, AdminActionError> {
        if actor.role != Role::SuperAdmin {
            return Err(AdminActionError::RoleChangeForbidden);
        }
        if data.role == Role::SuperAdmin {
            return Err(AdminActionError::SuperAdminPromotionForbidden);
        }

        let mut target = self
            .users
            .find_by_username(&data.username)
            .await
            .map_err(|e| AdminActionError::UnexpectedError(e.to_string()))?
            .ok_or(AdminActionError::UserNotFound)?;

        if target.role == Role::SuperAdmin {
            return Err(AdminActionError::SuperAdminImmutable);
        }

        let previous_role = target.role;
        target.role = data.role;
        let updated = self
            .users
            .update(target)
            .await
            .map_err(|e| AdminActionError::UnexpectedError(e.to_string()))?;

        tracing::info!(
            username = %updated.username,
            previous_role = %previous_role,
            new_role = %updated.role,
            changed_by = %actor.username,
            "user role changed"
        );

        let event = UserRoleChangedEvent::new(
            updated.id,
            updated.username.clone(),
            previous_role,
            updated.role,
            actor.username.clone(),
            actor.role.as_str(),
            Utc::now().naive_utc(),
        );
        self.publisher.publish_user_role_changed(&event)?;

        Ok(updated)
    }
}
