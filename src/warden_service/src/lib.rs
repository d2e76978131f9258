pub mod seed;
pub mod service;
pub mod tracing;

pub use seed::seed_super_admin;
pub use service::{ADMIN_ROLES, SUPER_ADMIN_ONLY, UserManagementService};
