use warden_core::{EmailClient, UserStore, VerificationTokenStore};

use crate::verification::VerificationTokens;

/// The acknowledgement returned for every forgot-password request,
/// whether or not the email matched an account.
pub const FORGOT_PASSWORD_ACK: &str =
    "If an account with this email exists, you will receive password reset instructions.";

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Password reset request failed")]
    UnexpectedError(String),
}

/// Forgot-password use case. Responds identically for unknown emails and
/// inactive accounts so the endpoint cannot be used to probe which emails
/// are registered.
pub struct ForgotPasswordUseCase<U, V, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    E: EmailClient,
{
    users: U,
    verification: VerificationTokens<V>,
    email_client: E,
}

impl<U, V, E> ForgotPasswordUseCase<U, V, E>
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

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &str) -> Result<(), ForgotPasswordError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| ForgotPasswordError::UnexpectedError(e.to_string()))?;

        let user = match user {
            Some(user) if user.active => user,
            _ => return Ok(()),
        };

        let token = self.verification.issue_password_reset(&user).await;
        self.email_client
            .send_email(
                &user.profile.email,
                "Password reset",
                &reset_email_body(&user.username, &token),
            )
            .await
            .map_err(ForgotPasswordError::UnexpectedError)?;

        tracing::info!(username = %user.username, "password reset requested");
        Ok(())
    }
}

fn reset_email_body(username: &str, token: &str) -> String {
    format!(
        "Hello {username},\n\n\
         A password reset was requested for your account. Use the token below\n\
         within the next hour to choose a new password.\n\n\
         {token}"
    )
}
