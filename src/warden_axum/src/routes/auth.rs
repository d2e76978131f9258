//! Authentication routes: thin handlers that deserialize, run a use case,
//! and map the outcome.

use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use warden_application::{
    ChangePasswordUseCase, ForgotPasswordUseCase, LoginUseCase, LogoutUseCase,
    ResetPasswordUseCase, SignUpData, SignUpUseCase, VerifyEmailUseCase,
    use_cases::forgot_password::FORGOT_PASSWORD_ACK,
};
use warden_core::{
    EmailClient, EventTransport, PasswordHasher, SessionStore, UserStore, VerificationTokenStore,
};

use crate::error::ApiError;
use crate::routes::{AuthResponse, bearer_token};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Secret<String>,
    pub new_password: Secret<String>,
    pub confirm_password: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: Secret<String>,
    pub confirm_password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all, fields(username = %request.username))]
pub async fn login<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.hasher.clone(),
    );
    let success = use_case.execute(&request.username, request.password).await?;

    Ok(Json(AuthResponse::logged_in(
        success.username,
        success.token,
        success.role,
    )))
}

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let token = bearer_token(&headers);
    let use_case = LogoutUseCase::new(state.sessions.clone());
    let username = use_case.execute(&token).await?;

    Ok(Json(AuthResponse::success(username, "Logout successful")))
}

#[tracing::instrument(name = "Sign up", skip_all, fields(username = %request.username))]
pub async fn signup<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let use_case = SignUpUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.verification.clone(),
        state.email.clone(),
    );
    let username = use_case
        .execute(SignUpData {
            username: request.username,
            password: request.password,
            confirm_password: request.confirm_password,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            address: request.address,
        })
        .await?;

    Ok(Json(AuthResponse::success(
        username,
        "User registered successfully! Please check your email to verify your account.",
    )))
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let use_case = VerifyEmailUseCase::new(
        state.users.clone(),
        state.verification.clone(),
        state.email.clone(),
    );
    let username = use_case.execute(&request.token).await?;

    Ok(Json(AuthResponse::success(
        username,
        "Email verified successfully! You can now log in.",
    )))
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    headers: HeaderMap,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let token = bearer_token(&headers);
    let use_case = ChangePasswordUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.hasher.clone(),
    );
    let username = use_case
        .execute(
            &token,
            request.current_password,
            request.new_password,
            request.confirm_password,
        )
        .await?;

    Ok(Json(AuthResponse::success(
        username,
        "Password changed successfully",
    )))
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.users.clone(),
        state.verification.clone(),
        state.email.clone(),
    );
    use_case.execute(&request.email).await?;

    // Identical acknowledgement whether or not the email matched an account.
    Ok(Json(AuthResponse {
        token: None,
        username: None,
        role: None,
        message: FORGOT_PASSWORD_ACK.to_owned(),
        success: true,
    }))
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, S, V, E, H, T>(
    State(state): State<AppState<U, S, V, E, H, T>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: EventTransport + Clone + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.verification.clone(),
    );
    let username = use_case
        .execute(&request.token, request.new_password, request.confirm_password)
        .await?;

    Ok(Json(AuthResponse::success(
        username,
        "Password reset successful! You can now log in with your new password.",
    )))
}
