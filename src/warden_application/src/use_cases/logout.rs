use warden_core::SessionStore;

/// Error types specific to the logout use case.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LogoutError {
    /// The token was unknown or already revoked. Revoking twice is safe but
    /// the second call reports this failure.
    #[error("Invalid token")]
    InvalidToken,
}

/// Logout use case - revokes a session token.
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: S,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: S) -> Self {
        Self { sessions }
    }

    /// Returns the username the token belonged to.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<String, LogoutError> {
        match self.sessions.revoke(token).await {
            Some(username) => {
                tracing::info!(%username, "user logged out successfully");
                Ok(username)
            }
            None => Err(LogoutError::InvalidToken),
        }
    }
}
