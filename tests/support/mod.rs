#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{
        Method, Request, Response,
        header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
    },
};
use folio::application::{
    admin::AdminBlogService,
    claims::{ClaimsError, ClaimsValidator},
    pagination::PageRequest,
    repos::{
        BlogQueryFilter, BlogsRepo, BlogsWriteRepo, CategoriesRepo, CategoryDetailsRepo,
        CreateBlogParams, CreateCategoryDetailParams, RepoError, UpdateBlogParams,
    },
};
use folio::domain::{
    entities::{AdminClaims, BlogRecord, CategoryDetailRecord, CategoryRecord},
    types::SortOrder,
};
use folio::infra::http::{AdminState, build_admin_router};
use http_body_util::BodyExt;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

pub const GOOD_TOKEN: &str = "good-token";
pub const ORPHAN_TOKEN: &str = "orphan-token";
pub const REVOKED_TOKEN: &str = "revoked-token";
pub const UNAVAILABLE_TOKEN: &str = "unavailable-token";

/// Accepts [`GOOD_TOKEN`], accepts [`ORPHAN_TOKEN`] without an identity and
/// rejects everything else.
pub struct StaticValidator;

#[async_trait]
impl ClaimsValidator for StaticValidator {
    async fn validate(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<AdminClaims>, ClaimsError> {
        match credential {
            None => Err(ClaimsError::Missing),
            Some(GOOD_TOKEN) => Ok(Some(admin_claims())),
            Some(ORPHAN_TOKEN) => Ok(None),
            Some(REVOKED_TOKEN) => Err(ClaimsError::Revoked),
            Some(UNAVAILABLE_TOKEN) => Err(ClaimsError::Unavailable {
                message: "database timeout".into(),
            }),
            Some(_) => Err(ClaimsError::Invalid),
        }
    }
}

pub fn admin_claims() -> AdminClaims {
    AdminClaims {
        subject: Uuid::nil(),
        email: "editor@example.com".into(),
        name: "Editor".into(),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    blogs: Mutex<Vec<BlogRecord>>,
    categories: Vec<CategoryRecord>,
    details: Mutex<Vec<CategoryDetailRecord>>,
    failing_removal: Mutex<Option<Uuid>>,
    failing_creation: Mutex<Option<Uuid>>,
}

impl MemoryStore {
    pub fn with_categories(slugs: &[&str]) -> Self {
        Self {
            categories: slugs
                .iter()
                .map(|slug| CategoryRecord {
                    id: Uuid::new_v4(),
                    slug: slug.to_string(),
                    name: format!("Category {slug}"),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn blog(&self, slug: &str) -> Option<BlogRecord> {
        self.blogs
            .lock()
            .unwrap()
            .iter()
            .find(|blog| blog.slug == slug)
            .cloned()
    }

    pub fn linked_slugs(&self, blog_slug: &str) -> Vec<String> {
        let Some(blog) = self.blog(blog_slug) else {
            return Vec::new();
        };
        let mut slugs: Vec<String> = self
            .details
            .lock()
            .unwrap()
            .iter()
            .filter(|detail| detail.blog_id == blog.id)
            .filter_map(|detail| self.categories.iter().find(|c| c.id == detail.category_id))
            .map(|category| category.slug.clone())
            .collect();
        slugs.sort();
        slugs
    }

    /// Make removing the link to `category_slug` fail with a timeout.
    pub fn fail_removal_of(&self, category_slug: &str) {
        let id = self
            .categories
            .iter()
            .find(|category| category.slug == category_slug)
            .map(|category| category.id);
        *self.failing_removal.lock().unwrap() = id;
    }

    /// Make linking a blog to `category_slug` fail with a timeout.
    pub fn fail_creation_of(&self, category_slug: &str) {
        *self.failing_creation.lock().unwrap() = self.category_id(category_slug);
    }

    fn category_id(&self, slug: &str) -> Option<Uuid> {
        self.categories
            .iter()
            .find(|category| category.slug == slug)
            .map(|category| category.id)
    }

    fn filtered(&self, filter: &BlogQueryFilter) -> Vec<BlogRecord> {
        let details = self.details.lock().unwrap();
        self.blogs
            .lock()
            .unwrap()
            .iter()
            .filter(|blog| match filter.category_slug.as_deref() {
                None => true,
                Some(slug) => details.iter().any(|detail| {
                    detail.blog_id == blog.id
                        && self
                            .categories
                            .iter()
                            .any(|c| c.id == detail.category_id && c.slug == slug)
                }),
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BlogsRepo for MemoryStore {
    async fn list_blogs(
        &self,
        filter: &BlogQueryFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<Vec<BlogRecord>, RepoError> {
        let mut blogs = self.filtered(filter);
        blogs.sort_by_key(|blog| (blog.created_at, blog.id));
        if order == SortOrder::Desc {
            blogs.reverse();
        }
        Ok(blogs
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count_blogs(&self, filter: &BlogQueryFilter) -> Result<u64, RepoError> {
        Ok(self.filtered(filter).len() as u64)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError> {
        Ok(self.blog(slug))
    }
}

#[async_trait]
impl BlogsWriteRepo for MemoryStore {
    async fn create_blog(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        // Strictly increasing timestamps keep the listing order deterministic.
        let created_at = OffsetDateTime::UNIX_EPOCH + Duration::minutes(blogs.len() as i64);
        let record = BlogRecord {
            id: Uuid::new_v4(),
            slug: params.slug,
            title: params.title,
            subtitle: params.subtitle,
            description: params.description,
            attachment: params.attachment,
            is_popular: params.is_popular,
            created_at,
            updated_at: created_at,
        };
        blogs.push(record.clone());
        Ok(record)
    }

    async fn update_blog(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError> {
        let mut blogs = self.blogs.lock().unwrap();
        let blog = blogs
            .iter_mut()
            .find(|blog| blog.id == params.id)
            .ok_or(RepoError::NotFound)?;
        blog.title = params.title;
        blog.subtitle = params.subtitle;
        blog.description = params.description;
        blog.attachment = params.attachment;
        blog.is_popular = params.is_popular;
        Ok(blog.clone())
    }
}

#[async_trait]
impl CategoriesRepo for MemoryStore {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        Ok(self.categories.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, RepoError> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list_for_blogs(
        &self,
        blog_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, CategoryRecord)>, RepoError> {
        let details = self.details.lock().unwrap();
        Ok(details
            .iter()
            .filter(|detail| blog_ids.contains(&detail.blog_id))
            .filter_map(|detail| {
                self.categories
                    .iter()
                    .find(|c| c.id == detail.category_id)
                    .map(|c| (detail.blog_id, c.clone()))
            })
            .collect())
    }
}

#[async_trait]
impl CategoryDetailsRepo for MemoryStore {
    async fn list_for_blog(&self, blog_id: Uuid) -> Result<Vec<CategoryDetailRecord>, RepoError> {
        Ok(self
            .details
            .lock()
            .unwrap()
            .iter()
            .filter(|detail| detail.blog_id == blog_id)
            .copied()
            .collect())
    }

    async fn create_detail(
        &self,
        params: CreateCategoryDetailParams,
    ) -> Result<CategoryDetailRecord, RepoError> {
        if *self.failing_creation.lock().unwrap() == Some(params.category_id) {
            return Err(RepoError::Timeout);
        }
        let record = CategoryDetailRecord {
            id: Uuid::new_v4(),
            blog_id: params.blog_id,
            category_id: params.category_id,
        };
        self.details.lock().unwrap().push(record);
        Ok(record)
    }

    async fn remove_detail(&self, id: Uuid) -> Result<(), RepoError> {
        let failing = *self.failing_removal.lock().unwrap();
        let mut details = self.details.lock().unwrap();
        if details
            .iter()
            .any(|detail| detail.id == id && Some(detail.category_id) == failing)
        {
            return Err(RepoError::Timeout);
        }
        details.retain(|detail| detail.id != id);
        Ok(())
    }
}

pub fn router(store: Arc<MemoryStore>) -> Router {
    let blogs = AdminBlogService::new(store.clone(), store.clone(), store.clone(), store);
    build_admin_router(AdminState {
        blogs: Arc::new(blogs),
        claims: Arc::new(StaticValidator),
        default_page_size: NonZeroU32::new(5).expect("non-zero"),
    })
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub fn post_form(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
