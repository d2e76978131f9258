use chrono::{Duration, Utc};
use uuid::Uuid;

use warden_core::{User, VerificationKind, VerificationToken, VerificationTokenStore};

const EMAIL_VERIFICATION_TTL_HOURS: i64 = 24;
const PASSWORD_RESET_TTL_HOURS: i64 = 1;

/// Issues and checks the single-use tokens mailed to users for email
/// verification and password resets.
///
/// Issuing a token supersedes any earlier token of the same kind for the
/// same user; checking a token enforces kind, expiry, and single use.
#[derive(Clone)]
pub struct VerificationTokens<V> {
    store: V,
}

impl<V> VerificationTokens<V>
where
    V: VerificationTokenStore,
{
    pub fn new(store: V) -> Self {
        Self { store }
    }

    fn generate_token() -> String {
        // Two v4 uuids give a 64-char hex string, plenty of entropy for a
        // mailed token and safe to embed in a URL.
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }

    pub async fn issue_email_verification(&self, user: &User) -> String {
        let token = Self::generate_token();
        self.store
            .put(VerificationToken {
                token: token.clone(),
                user_id: user.id,
                kind: VerificationKind::EmailVerification,
                expires_at: Utc::now().naive_utc() + Duration::hours(EMAIL_VERIFICATION_TTL_HOURS),
                used: false,
            })
            .await;
        tracing::info!(username = %user.username, "email verification token generated");
        token
    }

    pub async fn issue_password_reset(&self, user: &User) -> String {
        let token = Self::generate_token();
        self.store
            .put(VerificationToken {
                token: token.clone(),
                user_id: user.id,
                kind: VerificationKind::PasswordReset,
                expires_at: Utc::now().naive_utc() + Duration::hours(PASSWORD_RESET_TTL_HOURS),
                used: false,
            })
            .await;
        tracing::info!(username = %user.username, "password reset token generated");
        token
    }

    /// Validates and consumes an email-verification token in one step.
    pub async fn consume_email_verification(&self, token: &str) -> Option<VerificationToken> {
        let found = match self.store.find(token).await {
            Some(found) => found,
            None => {
                tracing::warn!("email verification attempted with unknown token");
                return None;
            }
        };

        if found.kind != VerificationKind::EmailVerification {
            tracing::warn!("token kind mismatch for email verification");
            return None;
        }

        if !found.is_valid(Utc::now().naive_utc()) {
            tracing::warn!(user_id = %found.user_id, "email verification attempted with expired or used token");
            return None;
        }

        self.store.mark_used(token).await;
        Some(found)
    }

    /// Validates a password-reset token without consuming it; callers mark
    /// it used once the new password is in place.
    pub async fn check_password_reset(&self, token: &str) -> Option<VerificationToken> {
        let found = match self.store.find(token).await {
            Some(found) => found,
            None => {
                tracing::warn!("password reset attempted with unknown token");
                return None;
            }
        };

        if found.kind != VerificationKind::PasswordReset {
            tracing::warn!("token kind mismatch for password reset");
            return None;
        }

        if !found.is_valid(Utc::now().naive_utc()) {
            tracing::warn!(user_id = %found.user_id, "password reset attempted with expired or used token");
            return None;
        }

        Some(found)
    }

    pub async fn mark_used(&self, token: &str) {
        self.store.mark_used(token).await;
    }
}
