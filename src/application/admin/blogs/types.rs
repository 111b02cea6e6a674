use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::{OffsetPage, PageRequest};
use crate::application::repos::RepoError;
use crate::domain::entities::{BlogRecord, BlogWithCategories, CategoryRecord};
use crate::domain::types::SortOrder;

pub const METRIC_BLOG_CREATED_TOTAL: &str = "folio_blog_created_total";
pub const METRIC_CATEGORY_LINK_FAILURES_TOTAL: &str = "folio_category_link_failures_total";

#[derive(Debug, Error)]
pub enum AdminBlogError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("no blog with slug `{slug}`")]
    BlogNotFound { slug: String },
    #[error("no category with slug `{slug}` for blog `{blog_slug}`")]
    CategoryNotFound { slug: String, blog_slug: String },
    #[error("failed to link a category to blog `{blog_slug}`")]
    Link {
        blog_slug: String,
        #[source]
        source: RepoError,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), AdminBlogError> {
    if value.trim().is_empty() {
        return Err(AdminBlogError::ConstraintViolation(field));
    }
    Ok(())
}

/// Trimmed, non-blank slugs in first-seen order with duplicates dropped.
pub fn distinct_slugs<I, S>(slugs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::<String>::new();
    for slug in slugs {
        let slug = slug.as_ref().trim();
        if slug.is_empty() || seen.iter().any(|existing| existing == slug) {
            continue;
        }
        seen.push(slug.to_string());
    }
    seen
}

#[derive(Debug, Clone)]
pub struct BlogListQuery {
    pub page: PageRequest,
    pub order: SortOrder,
    pub category_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogListing {
    pub blogs: OffsetPage<BlogWithCategories>,
    pub order: SortOrder,
    pub category_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub category: CategoryRecord,
    pub selected: bool,
}

/// Everything the edit form shows for one blog.
#[derive(Debug, Clone, Serialize)]
pub struct BlogEditor {
    pub blog: BlogWithCategories,
    pub options: Vec<CategoryOption>,
}

#[derive(Debug, Clone)]
pub struct CreateBlogCommand {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub attachment: String,
    pub is_popular: bool,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateBlogCommand {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Blank keeps the current attachment.
    pub attachment: String,
    pub is_popular: bool,
    /// `None` when the form carried no selection at all.
    pub categories: Option<Vec<String>>,
}

/// Result of one association removal or creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutcome {
    pub category_id: Uuid,
    pub category_slug: Option<String>,
    pub error: Option<String>,
}

impl LinkOutcome {
    pub fn succeeded(category_id: Uuid, category_slug: Option<String>) -> Self {
        Self {
            category_id,
            category_slug,
            error: None,
        }
    }

    pub fn failed(category_id: Uuid, category_slug: Option<String>, error: &RepoError) -> Self {
        Self {
            category_id,
            category_slug,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-association outcomes of an update. Failures are recorded here instead
/// of aborting the update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub removed: Vec<LinkOutcome>,
    pub created: Vec<LinkOutcome>,
}

impl ReconcileReport {
    pub fn failures(&self) -> impl Iterator<Item = &LinkOutcome> {
        self.removed
            .iter()
            .chain(self.created.iter())
            .filter(|outcome| !outcome.is_ok())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub blog: BlogRecord,
    pub report: ReconcileReport,
}

#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub blog: BlogRecord,
    pub links: Vec<LinkOutcome>,
}
