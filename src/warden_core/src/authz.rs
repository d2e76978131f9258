use thiserror::Error;

use crate::domain::{role::Role, user::User};
use crate::ports::repositories::{SessionStore, UserStore};

/// Exact prefix a bearer Authorization header must carry, trailing space
/// included.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The set of roles allowed to invoke a protected operation.
///
/// Declared statically next to the route registration; checked by exact
/// membership. Listing `[Admin, SuperAdmin]` is how an operation admits both
/// roles - there is no implicit promotion from a "higher" role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRoles(&'static [Role]);

impl RequiredRoles {
    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn as_slice(&self) -> &'static [Role] {
        self.0
    }
}

/// Why a request was rejected at the authorization boundary.
///
/// Every variant except `InsufficientRole` maps to HTTP 401;
/// `InsufficientRole` is the sole 403. `UnexpectedError` carries a failing
/// collaborator's error through to the boundary (HTTP 500).
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// No authenticated principal was attached to the call at all.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Authorization header missing or invalid")]
    MissingBearer,
    #[error("Invalid or expired token")]
    InvalidToken,
    /// The token is live but its owning account no longer exists. Tokens are
    /// not revoked when an account is deleted, so this can be observed.
    #[error("User not found")]
    UserNotFound,
    #[error("Insufficient permissions")]
    InsufficientRole,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AccessError {
    /// True only for the role-mismatch rejection, the one 403 case.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AccessError::InsufficientRole)
    }
}

impl PartialEq for AccessError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::MissingBearer, Self::MissingBearer) => true,
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::InsufficientRole, Self::InsufficientRole) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// The per-request authorization decision chain, evaluated once per
/// intercepted call with early exit:
///
/// 1. missing/ill-formed bearer header rejects with [`AccessError::MissingBearer`]
/// 2. a token the session store does not recognize rejects with
///    [`AccessError::InvalidToken`]
/// 3. a token whose owning account cannot be looked up rejects with
///    [`AccessError::UserNotFound`] (the account may have been deleted
///    concurrently - that still lands here)
/// 4. a principal whose role is not in `required` rejects with
///    [`AccessError::InsufficientRole`]
///
/// On success the resolved principal is returned for the wrapped handler.
pub async fn authorize<S, U>(
    auth_header: Option<&str>,
    sessions: &S,
    users: &U,
    required: RequiredRoles,
) -> Result<User, AccessError>
where
    S: SessionStore + ?Sized,
    U: UserStore + ?Sized,
{
    let header = auth_header.ok_or(AccessError::MissingBearer)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AccessError::MissingBearer)?;

    if !sessions.validate(token).await {
        return Err(AccessError::InvalidToken);
    }

    let username = sessions
        .resolve_owner(token)
        .await
        .ok_or(AccessError::InvalidToken)?;

    let user = users
        .find_by_username(&username)
        .await
        .map_err(|e| AccessError::UnexpectedError(e.to_string()))?
        .ok_or(AccessError::UserNotFound)?;

    if !required.contains(user.role) {
        return Err(AccessError::InsufficientRole);
    }

    Ok(user)
}
