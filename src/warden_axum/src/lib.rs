pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{CurrentUser, RoleGuard, require_roles};
pub use state::AppState;
