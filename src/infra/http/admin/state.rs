use std::{num::NonZeroU32, sync::Arc};

use crate::application::{admin::AdminBlogService, claims::ClaimsValidator};

#[derive(Clone)]
pub struct AdminState {
    pub blogs: Arc<AdminBlogService>,
    pub claims: Arc<dyn ClaimsValidator>,
    pub default_page_size: NonZeroU32,
}
