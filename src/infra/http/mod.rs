mod admin;
mod middleware;

pub use admin::{ADMIN_COOKIE, AdminIdentity, AdminState, build_admin_router};
