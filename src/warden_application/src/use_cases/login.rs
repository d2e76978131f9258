use secrecy::Secret;

use warden_core::{PasswordHasher, Role, SessionStore, UserStore};

/// Response from a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub username: String,
    pub token: String,
    pub role: Role,
}

/// Error types specific to the login use case.
///
/// `InvalidCredentials` is deliberately the same whether the username was
/// unknown or the password merely wrong; the response must not reveal which.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User account is deactivated")]
    AccountDeactivated,
    #[error("Please verify your email address before logging in")]
    EmailNotVerified,
    #[error("Login failed")]
    UnexpectedError(String),
}

impl PartialEq for LoginError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::AccountDeactivated, Self::AccountDeactivated) => true,
            (Self::EmailNotVerified, Self::EmailNotVerified) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Login use case - verifies credentials, checks account-state
/// preconditions in order, then issues a session token.
pub struct LoginUseCase<U, S, H>
where
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    users: U,
    sessions: S,
    hasher: H,
}

impl<U, S, H> LoginUseCase<U, S, H>
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

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        password: Secret<String>,
    ) -> Result<LoginSuccess, LoginError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| LoginError::UnexpectedError(e.to_string()))?;

        let user = match user {
            Some(user) if self.hasher.verify(&password, &user.password_hash) => user,
            _ => {
                tracing::warn!(username, "failed login attempt");
                return Err(LoginError::InvalidCredentials);
            }
        };

        // Account-state preconditions, checked in this order: an account
        // that is both deactivated and unverified reports deactivation.
        if !user.active {
            tracing::warn!(username, "login attempt for deactivated user");
            return Err(LoginError::AccountDeactivated);
        }

        if !user.email_verified {
            return Err(LoginError::EmailNotVerified);
        }

        let token = self.sessions.issue(&user.username).await;
        tracing::info!(username = %user.username, role = %user.role, "user logged in successfully");

        Ok(LoginSuccess {
            username: user.username,
            token,
            role: user.role,
        })
    }
}
