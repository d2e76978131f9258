use axum::{
    Router,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use warden_application::{EventPublisher, EventTopics, VerificationTokens};
use warden_axum::{
    AppState, RoleGuard, require_roles,
    routes::{admin, auth, users},
};
use warden_core::{
    EmailClient, EventTransport, PasswordHasher, RequiredRoles, Role, SessionStore, UserStore,
    VerificationTokenStore,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Required-role declarations for the protected part of the API. Declared
/// here, at assembly time, next to the routes they protect. Both roles are
/// listed where both are admitted; nothing is inferred from role ordering.
pub const ADMIN_ROLES: RequiredRoles = RequiredRoles::new(&[Role::Admin, Role::SuperAdmin]);
pub const SUPER_ADMIN_ONLY: RequiredRoles = RequiredRoles::new(&[Role::SuperAdmin]);

/// The assembled user-management service: auth, admin, and user-directory
/// routes over the provided stores.
pub struct UserManagementService {
    router: Router,
}

impl UserManagementService {
    /// Wire the service from its collaborators.
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arcs for thread-safe sharing;
    /// routes build use cases per request from cheap clones.
    pub fn new<U, S, V, E, H, T>(
        users: U,
        sessions: S,
        verification_tokens: V,
        email_client: E,
        hasher: H,
        transport: T,
        topics: EventTopics,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        S: SessionStore + Clone + 'static,
        V: VerificationTokenStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: EventTransport + Clone + 'static,
    {
        let state = AppState {
            users: users.clone(),
            sessions: sessions.clone(),
            verification: VerificationTokens::new(verification_tokens),
            email: email_client,
            hasher,
            publisher: EventPublisher::new(transport, topics),
        };

        let auth_routes = Router::new()
            .route("/signup", post(auth::signup::<U, S, V, E, H, T>))
            .route("/login", post(auth::login::<U, S, V, E, H, T>))
            .route("/logout", post(auth::logout::<U, S, V, E, H, T>))
            .route("/verify-email", post(auth::verify_email::<U, S, V, E, H, T>))
            .route(
                "/forgot-password",
                post(auth::forgot_password::<U, S, V, E, H, T>),
            )
            .route(
                "/reset-password",
                post(auth::reset_password::<U, S, V, E, H, T>),
            )
            .route(
                "/change-password",
                put(auth::change_password::<U, S, V, E, H, T>),
            )
            .with_state(state.clone());

        let admin_guard = RoleGuard::new(sessions.clone(), users.clone(), ADMIN_ROLES);
        let super_admin_guard = RoleGuard::new(sessions, users, SUPER_ADMIN_ONLY);

        let admin_routes = Router::new()
            // Admin and Super Admin can create users
            .route(
                "/users",
                post(admin::create_user::<U, S, V, E, H, T>).layer(from_fn_with_state(
                    admin_guard.clone(),
                    require_roles::<S, U>,
                )),
            )
            // Only Super Admin can create admin users
            .route(
                "/users/admin",
                post(admin::create_admin::<U, S, V, E, H, T>).layer(from_fn_with_state(
                    super_admin_guard.clone(),
                    require_roles::<S, U>,
                )),
            )
            // Only Super Admin can change user roles
            .route(
                "/users/role",
                put(admin::change_role::<U, S, V, E, H, T>).layer(from_fn_with_state(
                    super_admin_guard,
                    require_roles::<S, U>,
                )),
            )
            .with_state(state.clone());

        let user_routes = Router::new()
            .route("/", get(users::list_users::<U, S, V, E, H, T>))
            .route(
                "/username/{username}",
                get(users::get_user_by_username::<U, S, V, E, H, T>),
            )
            .route(
                "/{id}",
                get(users::get_user::<U, S, V, E, H, T>)
                    .delete(users::delete_user::<U, S, V, E, H, T>),
            )
            .layer(from_fn_with_state(admin_guard, require_roles::<S, U>))
            .with_state(state);

        let router = Router::new()
            .nest("/api/auth", auth_routes)
            .nest("/api/admin", admin_routes)
            .nest("/api/users", user_routes);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting CORS to the given origins.
    pub fn into_router(mut self, allowed_origins: Option<Vec<HeaderValue>>) -> Router {
        if let Some(origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods(tower_http::cors::Any)
                .allow_origin(AllowOrigin::list(origins));
            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<Vec<HeaderValue>>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("user management service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
