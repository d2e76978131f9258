use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use warden_core::{AccessError, RequiredRoles, SessionStore, User, UserStore, authorize};

/// The authenticated principal, attached to the request by
/// [`require_roles`] for the wrapped handler to pick up.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Per-route state for the authorization middleware: the stores it reads and
/// the roles the route admits.
pub struct RoleGuard<S, U> {
    pub sessions: S,
    pub users: U,
    pub required: RequiredRoles,
}

impl<S, U> RoleGuard<S, U> {
    pub fn new(sessions: S, users: U, required: RequiredRoles) -> Self {
        Self {
            sessions,
            users,
            required,
        }
    }
}

impl<S: Clone, U: Clone> Clone for RoleGuard<S, U> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            users: self.users.clone(),
            required: self.required,
        }
    }
}

/// Request-boundary role check, run once per intercepted call.
///
/// Delegates the decision chain to [`warden_core::authorize`]; on success the
/// principal rides along as a request extension and the handler's response
/// passes through untouched. Rejections map to 401, except the role mismatch
/// which is the single 403.
pub async fn require_roles<S, U>(
    State(guard): State<RoleGuard<S, U>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
{
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match authorize(auth_header, &guard.sessions, &guard.users, guard.required).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(error) => {
            if error.is_forbidden() {
                if let Some(username) = resolve_rejected_principal(&guard, auth_header).await {
                    tracing::warn!(
                        %username,
                        required = ?guard.required.as_slice(),
                        "user attempted to access endpoint without a required role"
                    );
                }
            }
            rejection_response(error)
        }
    }
}

/// Best-effort owner lookup for the role-mismatch warning log.
async fn resolve_rejected_principal<S, U>(
    guard: &RoleGuard<S, U>,
    auth_header: Option<&str>,
) -> Option<String>
where
    S: SessionStore,
    U: UserStore,
{
    let token = auth_header?.strip_prefix(warden_core::authz::BEARER_PREFIX)?;
    guard.sessions.resolve_owner(token).await
}

pub fn rejection_response(error: AccessError) -> Response {
    let status = match &error {
        AccessError::InsufficientRole => StatusCode::FORBIDDEN,
        AccessError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    };

    (
        status,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}
