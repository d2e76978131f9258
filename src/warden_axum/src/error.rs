use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use warden_application::{
    AdminActionError, ChangePasswordError, ForgotPasswordError, LoginError, LogoutError,
    ResetPasswordError, SignUpError, VerifyEmailError,
};
use warden_core::UserStoreError;

use crate::routes::AuthResponse;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A business-rule failure; rendered as a 400 with the outcome message
    /// in the auth-response body, the shape clients already parse.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure(message)),
            )
                .into_response(),

            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),

            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),

            ApiError::UnexpectedError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<SignUpError> for ApiError {
    fn from(error: SignUpError) -> Self {
        match error {
            SignUpError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AdminActionError> for ApiError {
    fn from(error: AdminActionError) -> Self {
        match error {
            AdminActionError::Publish(e) => ApiError::UnexpectedError(e.to_string()),
            AdminActionError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ApiError::NotFound(error.to_string()),
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}
