use secrecy::{ExposeSecret, Secret};

use warden_core::{PasswordHasher, SessionStore, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("New password and confirm password do not match")]
    PasswordMismatch,
    #[error("User account is deactivated")]
    AccountDeactivated,
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,
    #[error("Failed to change password")]
    UnexpectedError(String),
}

impl PartialEq for ChangePasswordError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::PasswordMismatch, Self::PasswordMismatch) => true,
            (Self::AccountDeactivated, Self::AccountDeactivated) => true,
            (Self::CurrentPasswordIncorrect, Self::CurrentPasswordIncorrect) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Change-password use case - re-authenticates with the current password
/// before storing a new hash. The session token stays valid afterwards.
pub struct ChangePasswordUseCase<U, S, H>
where
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    users: U,
    sessions: S,
    hasher: H,
}

impl<U, S, H> ChangePasswordUseCase<U, S, H>
where
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    pub fn new(users: U, sessions: S, hasher: H) -> Self {
        Self {
            users,
            sessions,
            hasher,
        }
    }

    /// Returns the username whose password changed.
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        current_password: Secret<String>,
        new_password: Secret<String>,
        confirm_password: Secret<String>,
    ) -> Result<String, ChangePasswordError> {
        let username = self
            .sessions
            .resolve_owner(token)
            .await
            .ok_or(ChangePasswordError::InvalidToken)?;

        if new_password.expose_secret() != confirm_password.expose_secret() {
            return Err(ChangePasswordError::PasswordMismatch);
        }

        let mut user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?
            .ok_or_else(|| ChangePasswordError::UnexpectedError("user vanished".to_owned()))?;

        if !user.active {
            return Err(ChangePasswordError::AccountDeactivated);
        }

        if !self.hasher.verify(&current_password, &user.password_hash) {
            tracing::warn!(%username, "invalid current password attempt");
            return Err(ChangePasswordError::CurrentPasswordIncorrect);
        }

        user.password_hash = self
            .hasher
            .hash(&new_password)
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;
        self.users
            .update(user)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;

        tracing::info!(%username, "password changed successfully");
        Ok(username)
    }
}
