use secrecy::{ExposeSecret, Secret};

use warden_core::{PasswordHasher, UserStore, VerificationTokenStore};

use crate::verification::VerificationTokens;

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("New password and confirm password do not match")]
    PasswordMismatch,
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Password reset failed")]
    UnexpectedError(String),
}

impl PartialEq for ResetPasswordError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PasswordMismatch, Self::PasswordMismatch) => true,
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Reset-password use case - trades a mailed reset token for a new
/// password hash. The token is marked used only after the new hash is
/// stored.
pub struct ResetPasswordUseCase<U, H, V>
where
    U: UserStore,
    H: PasswordHasher,
    V: VerificationTokenStore,
{
    users: U,
    hasher: H,
    verification: VerificationTokens<V>,
}

impl<U, H, V> ResetPasswordUseCase<U, H, V>
where
    U: UserStore,
    H: PasswordHasher,
    V: VerificationTokenStore,
{
    pub fn new(users: U, hasher: H, verification: VerificationTokens<V>) -> Self {
        Self {
            users,
            hasher,
            verification,
        }
    }

    /// Returns the username whose password was reset.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Secret<String>,
        confirm_password: Secret<String>,
    ) -> Result<String, ResetPasswordError> {
        if new_password.expose_secret() != confirm_password.expose_secret() {
            return Err(ResetPasswordError::PasswordMismatch);
        }

        let reset = self
            .verification
            .check_password_reset(token)
            .await
            .ok_or(ResetPasswordError::InvalidToken)?;

        let mut user = self
            .users
            .find_by_id(reset.user_id)
            .await
            .map_err(|e| ResetPasswordError::UnexpectedError(e.to_string()))?
            .ok_or(ResetPasswordError::InvalidToken)?;

        user.password_hash = self
            .hasher
            .hash(&new_password)
            .map_err(|e| ResetPasswordError::UnexpectedError(e.to_string()))?;
        let user = self
            .users
            .update(user)
            .await
            .map_err(|e| ResetPasswordError::UnexpectedError(e.to_string()))?;

        self.verification.mark_used(token).await;

        tracing::info!(username = %user.username, "password reset successfully");
        Ok(user.username)
    }
}
