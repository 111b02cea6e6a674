use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::application::pagination::OffsetPage;
use crate::application::repos::{BlogQueryFilter, RepoError};
use crate::domain::entities::{AdminClaims, BlogRecord, BlogWithCategories, CategoryRecord};

use super::service::AdminBlogService;
use super::types::{AdminBlogError, BlogEditor, BlogListQuery, BlogListing, CategoryOption};

impl AdminBlogService {
    pub async fn list_blogs(
        &self,
        claims: &AdminClaims,
        query: BlogListQuery,
    ) -> Result<BlogListing, AdminBlogError> {
        let filter = BlogQueryFilter::category(query.category_slug.as_deref());

        let records = self
            .reader
            .list_blogs(&filter, query.order, query.page)
            .await?;
        let total = self.reader.count_blogs(&filter).await?;
        let blogs = self.attach_categories(records).await?;

        debug!(
            target = "folio::admin::blogs",
            actor = %claims.email,
            page = query.page.page(),
            size = query.page.size(),
            total,
            "listed blogs"
        );

        Ok(BlogListing {
            blogs: OffsetPage::new(blogs, query.page, total),
            order: query.order,
            category_slug: filter.category_slug,
        })
    }

    /// Categories offered by the creation form.
    pub async fn load_create_form(
        &self,
        _claims: &AdminClaims,
    ) -> Result<Vec<CategoryRecord>, AdminBlogError> {
        Ok(self.categories.list_all().await?)
    }

    pub async fn load_edit_form(
        &self,
        _claims: &AdminClaims,
        slug: &str,
    ) -> Result<BlogEditor, AdminBlogError> {
        let blog = self.require_blog(slug).await?;
        let blog = self.with_categories(blog).await?;
        let all = self.categories.list_all().await?;

        let options = all
            .into_iter()
            .map(|category| CategoryOption {
                selected: blog.categories.iter().any(|c| c.id == category.id),
                category,
            })
            .collect();

        Ok(BlogEditor { blog, options })
    }

    pub(super) async fn require_blog(&self, slug: &str) -> Result<BlogRecord, AdminBlogError> {
        self.reader
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AdminBlogError::BlogNotFound {
                slug: slug.to_string(),
            })
    }

    pub(super) async fn with_categories(
        &self,
        blog: BlogRecord,
    ) -> Result<BlogWithCategories, RepoError> {
        let mut attached = self.attach_categories(vec![blog]).await?;
        attached.pop().ok_or(RepoError::NotFound)
    }

    async fn attach_categories(
        &self,
        blogs: Vec<BlogRecord>,
    ) -> Result<Vec<BlogWithCategories>, RepoError> {
        if blogs.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = blogs.iter().map(|blog| blog.id).collect();
        let mut by_blog: HashMap<Uuid, Vec<CategoryRecord>> = HashMap::new();
        for (blog_id, category) in self.categories.list_for_blogs(&ids).await? {
            by_blog.entry(blog_id).or_default().push(category);
        }

        Ok(blogs
            .into_iter()
            .map(|blog| BlogWithCategories {
                categories: by_blog.remove(&blog.id).unwrap_or_default(),
                blog,
            })
            .collect())
    }
}
