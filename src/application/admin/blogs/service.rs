use std::sync::Arc;

use crate::application::repos::{BlogsRepo, BlogsWriteRepo, CategoriesRepo, CategoryDetailsRepo};

#[derive(Clone)]
pub struct AdminBlogService {
    pub(crate) reader: Arc<dyn BlogsRepo>,
    pub(crate) writer: Arc<dyn BlogsWriteRepo>,
    pub(crate) categories: Arc<dyn CategoriesRepo>,
    pub(crate) details: Arc<dyn CategoryDetailsRepo>,
}

impl AdminBlogService {
    pub fn new(
        reader: Arc<dyn BlogsRepo>,
        writer: Arc<dyn BlogsWriteRepo>,
        categories: Arc<dyn CategoriesRepo>,
        details: Arc<dyn CategoryDetailsRepo>,
    ) -> Self {
        Self {
            reader,
            writer,
            categories,
            details,
        }
    }
}
