use secrecy::{ExposeSecret, Secret};

use warden_core::{EmailClient, NewUser, PasswordHasher, Profile, Role, UserStore,
    VerificationTokenStore};

use crate::verification::VerificationTokens;

/// Data required to register a new account.
#[derive(Debug)]
pub struct SignUpData {
    pub username: String,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SignUpError {
    #[error("Password and confirm password do not match")]
    PasswordMismatch,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Registration failed")]
    UnexpectedError(String),
}

impl PartialEq for SignUpError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PasswordMismatch, Self::PasswordMismatch) => true,
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Signup use case - registers a user account that must verify its email
/// before it can log in.
pub struct SignUpUseCase<U, H, V, E>
where
    U: UserStore,
    H: PasswordHasher,
    V: VerificationTokenStore,
    E: EmailClient,
{
    users: U,
    hasher: H,
    verification: VerificationTokens<V>,
    email_client: E,
}

impl<U, H, V, E> SignUpUseCase<U, H, V, E>
where
    U: UserStore,
    H: PasswordHasher,
    V: VerificationTokenStore,
    E: EmailClient,
{
    pub fn new(users: U, hasher: H, verification: VerificationTokens<V>, email_client: E) -> Self {
        Self {
            users,
            hasher,
            verification,
            email_client,
        }
    }

    /// Returns the registered username.
    #[tracing::instrument(name = "SignUpUseCase::execute", skip_all, fields(username = %data.username))]
    pub async fn execute(&self, data: SignUpData) -> Result<String, SignUpError> {
        if data.password.expose_secret() != data.confirm_password.expose_secret() {
            return Err(SignUpError::PasswordMismatch);
        }

        if self
            .users
            .find_by_username(&data.username)
            .await
            .map_err(|e| SignUpError::UnexpectedError(e.to_string()))?
            .is_some()
        {
            return Err(SignUpError::UsernameTaken);
        }

        if self
            .users
            .find_by_email(&data.email)
            .await
            .map_err(|e| SignUpError::UnexpectedError(e.to_string()))?
            .is_some()
        {
            return Err(SignUpError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&data.password)
            .map_err(|e| SignUpError::UnexpectedError(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser {
                username: data.username.clone(),
                password_hash,
                profile: Profile {
                    first_name: data.first_name,
                    last_name: data.last_name,
                    email: data.email,
                    phone_number: data.phone_number,
                    address: data.address,
                },
                active: true,
                // Verified via the emailed token, never at registration.
                email_verified: false,
                role: Role::User,
            })
            .await
            .map_err(|e| SignUpError::UnexpectedError(e.to_string()))?;

        let token = self.verification.issue_email_verification(&user).await;
        self.email_client
            .send_email(
                &user.profile.email,
                "Verify your email address",
                &verification_email_body(&user.username, &token),
            )
            .await
            .map_err(SignUpError::UnexpectedError)?;

        tracing::info!(username = %user.username, "new user registered");
        Ok(user.username)
    }
}

/// The token sits alone on the final line so callers (and tests) can lift it
/// out without scraping markup.
fn verification_email_body(username: &str, token: &str) -> String {
    format!(
        "Hello {username},\n\n\
         Welcome! Please verify your email address with the token below.\n\
         The token expires in 24 hours.\n\n\
         {token}"
    )
}
