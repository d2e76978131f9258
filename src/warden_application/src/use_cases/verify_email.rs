use warden_core::{EmailClient, UserStore, VerificationTokenStore};

use crate::verification::VerificationTokens;

#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid or expired verification token")]
    InvalidToken,
    #[error("Email verification failed")]
    UnexpectedError(String),
}

impl PartialEq for VerifyEmailError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Email verification use case - consumes a mailed token and marks the
/// account as verified.
pub struct VerifyEmailUseCase<U, V, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    E: EmailClient,
{
    users: U,
    verification: VerificationTokens<V>,
    email_client: E,
}

impl<U, V, E> VerifyEmailUseCase<U, V, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    E: EmailClient,
{
    pub fn new(users: U, verification: VerificationTokens<V>, email_client: E) -> Self {
        Self {
            users,
            verification,
            email_client,
        }
    }

    /// Returns the username of the verified account.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<String, VerifyEmailError> {
        let verification = self
            .verification
            .consume_email_verification(token)
            .await
            .ok_or(VerifyEmailError::InvalidToken)?;

        let mut user = self
            .users
            .find_by_id(verification.user_id)
            .await
            .map_err(|e| VerifyEmailError::UnexpectedError(e.to_string()))?
            .ok_or(VerifyEmailError::InvalidToken)?;

        user.email_verified = true;
        let user = self
            .users
            .update(user)
            .await
            .map_err(|e| VerifyEmailError::UnexpectedError(e.to_string()))?;

        // Welcome mail failures are logged, not surfaced: the account is
        // already verified at this point.
        if let Err(err) = self
            .email_client
            .send_email(
                &user.profile.email,
                "Welcome!",
                &format!(
                    "Hello {},\n\nYour email has been verified. You can now log in.",
                    user.username
                ),
            )
            .await
        {
            tracing::error!(username = %user.username, error = %err, "failed to send welcome email");
        }

        tracing::info!(username = %user.username, "email verified successfully");
        Ok(user.username)
    }
}
