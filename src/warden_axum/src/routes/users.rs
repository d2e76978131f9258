//! User directory routes: read and delete over the user store.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use warden_core::{
    EmailClient, EventTransport, PasswordHasher, SessionStore, UserId, UserStore,
    UserStoreError, VerificationTokenStore,
};

use crate::error::ApiError;
use crate::routes::UserDto;
use crate::state::AppState;

#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let users = state.users.list().await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(dtos))
}

#[tracing::instrument(name = "Get user", skip_all, fields(id))]
pub async fn get_user<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let user = state
        .users
        .find_by_id(UserId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(UserStoreError::UserNotFound.to_string()))?;

    Ok(Json(UserDto::from(user)))
}

#[tracing::instrument(name = "Get user by username", skip_all, fields(username = %username))]
pub async fn get_user_by_username<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(UserStoreError::UserNotFound.to_string()))?;

    Ok(Json(UserDto::from(user)))
}

#[tracing::instrument(name = "Delete user", skip_all, fields(id))]
pub async fn delete_user<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    state.users.delete(UserId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
