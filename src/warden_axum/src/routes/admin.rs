//! Admin routes. All of them sit behind the role middleware; the handlers
//! read the authenticated actor from the request extensions.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use warden_application::{
    ChangeRoleData, ChangeUserRoleUseCase, CreateManagedUserUseCase, ManagedUserData,
};
use warden_core::{
    EmailClient, EventTransport, PasswordHasher, Role, SessionStore, UserStore,
    VerificationTokenStore,
};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::routes::AuthResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateUserRequest {
    pub username: String,
    pub password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub username: String,
    pub role: Role,
}

impl AdminCreateUserRequest {
    fn into_data(self, role: Role) -> ManagedUserData {
        ManagedUserData {
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            role,
        }
    }
}

/// A protected handler running without the middleware having attached a
/// principal is a wiring bug; report it as a bare 401 rather than panic.
fn actor(current_user: Option<Extension<CurrentUser>>) -> Result<warden_core::User, ApiError> {
    current_user
        .map(|Extension(CurrentUser(user))| user)
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_owned()))
}

#[tracing::instrument(name = "Admin create user", skip_all, fields(username = %request.username))]
pub async fn create_user<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    current_user: Option<Extension<CurrentUser>>,
    Json(request): Json<AdminCreateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let actor = actor(current_user)?;
    let role = request.role;
    let use_case = CreateManagedUserUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.publisher.clone(),
    );
    let created = use_case.execute(&actor, request.into_data(role)).await?;

    Ok(Json(AuthResponse::success(
        created.username,
        format!("User created successfully with role {}", created.role),
    )))
}

#[tracing::instrument(name = "Admin create admin", skip_all, fields(username = %request.username))]
pub async fn create_admin<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    current_user: Option<Extension<CurrentUser>>,
    Json(request): Json<AdminCreateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let actor = actor(current_user)?;
    let use_case = CreateManagedUserUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.publisher.clone(),
    );
    // This endpoint always creates admins, whatever the request says.
    let created = use_case
        .execute(&actor, request.into_data(Role::Admin))
        .await?;

    Ok(Json(AuthResponse::success(
        created.username,
        format!("User created successfully with role {}", created.role),
    )))
}

#[tracing::instrument(name = "Admin change role", skip_all, fields(username = %request.username))]
pub async fn change_role<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    current_user: Option<Extension<CurrentUser>>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let actor = actor(current_user)?;
    let use_case = ChangeUserRoleUseCase::new(state.users.clone(), state.publisher.clone());
    let updated = use_case
        .execute(
            &actor,
            ChangeRoleData {
                username: request.username,
                role: request.role,
            },
        )
        .await?;

    Ok(Json(AuthResponse::success(
        updated.username,
        format!("User role changed to {}", updated.role),
    )))
}
