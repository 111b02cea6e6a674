mod blogs;
mod error_page;
mod identity;
mod state;

pub use identity::{ADMIN_COOKIE, AdminIdentity};
pub use state::AdminState;

use axum::{Router, middleware, routing::get};

use crate::application::error::ERROR_PAGE_PATH;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/index", get(blogs::admin_blogs))
        .route(
            "/admin/insert",
            get(blogs::admin_blog_new).post(blogs::admin_blog_create),
        )
        .route(
            "/admin/edit/{slug}",
            get(blogs::admin_blog_edit).post(blogs::admin_blog_update),
        )
        .route(ERROR_PAGE_PATH, get(error_page::error_page))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
