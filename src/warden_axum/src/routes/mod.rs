pub mod admin;
pub mod auth;
pub mod users;

use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};

use warden_core::{Role, User, authz::BEARER_PREFIX};

/// Response body shared by the auth and admin endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub message: String,
    pub success: bool,
}

impl AuthResponse {
    pub fn success(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            token: None,
            username: Some(username.into()),
            role: None,
            message: message.into(),
            success: true,
        }
    }

    pub fn logged_in(username: impl Into<String>, token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
            role: Some(role),
            message: "Login successful".to_owned(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            token: None,
            username: None,
            role: None,
            message: message.into(),
            success: false,
        }
    }
}

/// Public view of a user account; never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub role: Role,
    pub active: bool,
    pub email_verified: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username,
            first_name: user.profile.first_name,
            last_name: user.profile.last_name,
            email: user.profile.email,
            phone_number: user.profile.phone_number,
            address: user.profile.address,
            role: user.role,
            active: user.active,
            email_verified: user.email_verified,
        }
    }
}

/// Pulls the bearer token out of the Authorization header for the endpoints
/// that consume the token themselves (logout, change-password). A header
/// without the bearer prefix is passed through as-is and fails validation
/// downstream.
pub(crate) fn bearer_token(headers: &HeaderMap) -> String {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).to_owned()
}
