//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::domain::entities::{
    AdminAccountRecord, AdminTokenRecord, BlogRecord, CategoryDetailRecord, CategoryRecord,
};
use crate::domain::types::SortOrder;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogQueryFilter {
    /// Restrict to blogs linked to this category. Blank is treated as absent.
    pub category_slug: Option<String>,
}

impl BlogQueryFilter {
    pub fn category(slug: Option<&str>) -> Self {
        Self {
            category_slug: slug
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBlogParams {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub attachment: String,
    pub is_popular: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateBlogParams {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub attachment: String,
    pub is_popular: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CreateCategoryDetailParams {
    pub blog_id: Uuid,
    pub category_id: Uuid,
}

#[async_trait]
pub trait BlogsRepo: Send + Sync {
    /// Page of blogs ordered by `(created_at, id)` in `order`.
    async fn list_blogs(
        &self,
        filter: &BlogQueryFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<Vec<BlogRecord>, RepoError>;

    async fn count_blogs(&self, filter: &BlogQueryFilter) -> Result<u64, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError>;
}

#[async_trait]
pub trait BlogsWriteRepo: Send + Sync {
    async fn create_blog(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError>;

    async fn update_blog(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, RepoError>;

    /// Categories of each given blog, keyed by blog id, in name order.
    async fn list_for_blogs(
        &self,
        blog_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, CategoryRecord)>, RepoError>;
}

#[async_trait]
pub trait CategoryDetailsRepo: Send + Sync {
    async fn list_for_blog(&self, blog_id: Uuid) -> Result<Vec<CategoryDetailRecord>, RepoError>;

    async fn create_detail(
        &self,
        params: CreateCategoryDetailParams,
    ) -> Result<CategoryDetailRecord, RepoError>;

    async fn remove_detail(&self, id: Uuid) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateAdminAccountParams {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateAdminTokenParams {
    pub admin_id: Uuid,
    pub prefix: String,
    pub hashed_secret: Vec<u8>,
}

#[async_trait]
pub trait AdminAccountsRepo: Send + Sync {
    async fn find_token_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Option<AdminTokenRecord>, RepoError>;

    async fn find_account(&self, id: Uuid) -> Result<Option<AdminAccountRecord>, RepoError>;

    async fn create_account(
        &self,
        params: CreateAdminAccountParams,
    ) -> Result<AdminAccountRecord, RepoError>;

    async fn create_token(
        &self,
        params: CreateAdminTokenParams,
    ) -> Result<AdminTokenRecord, RepoError>;
}
