use std::collections::HashMap;

use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::repos::{CreateBlogParams, CreateCategoryDetailParams, UpdateBlogParams};
use crate::domain::entities::{AdminClaims, BlogRecord, CategoryRecord};
use crate::domain::slug::{SlugError, UniqueSlugError, unique_slug};

use super::service::AdminBlogService;
use super::types::{
    AdminBlogError, CreateBlogCommand, CreateOutcome, LinkOutcome, METRIC_BLOG_CREATED_TOTAL,
    METRIC_CATEGORY_LINK_FAILURES_TOTAL, ReconcileReport, UpdateBlogCommand, UpdateOutcome,
    distinct_slugs, ensure_non_empty,
};

impl AdminBlogService {
    /// Create a blog and link it to each submitted category.
    ///
    /// Steps commit one by one. When a category cannot be resolved or linked
    /// the blog and the links made so far stay in place and the returned error
    /// names the blog.
    pub async fn create_blog(
        &self,
        claims: &AdminClaims,
        command: CreateBlogCommand,
    ) -> Result<CreateOutcome, AdminBlogError> {
        ensure_non_empty(&command.title, "title")?;

        let reader = self.reader.clone();
        let slug = match unique_slug(&command.title, move |candidate| {
            let reader = reader.clone();
            async move {
                reader
                    .find_by_slug(&candidate)
                    .await
                    .map(|existing| existing.is_none())
            }
        })
        .await
        {
            Ok(slug) => slug,
            Err(UniqueSlugError::Slug(err)) => match err {
                SlugError::EmptyInput | SlugError::Unrepresentable { .. } => {
                    return Err(AdminBlogError::ConstraintViolation("title"));
                }
                SlugError::Exhausted { .. } => {
                    return Err(AdminBlogError::ConstraintViolation("slug"));
                }
            },
            Err(UniqueSlugError::Lookup(err)) => return Err(AdminBlogError::Repo(err)),
        };

        let blog = self
            .writer
            .create_blog(CreateBlogParams {
                slug,
                title: command.title.trim().to_string(),
                subtitle: command.subtitle,
                description: command.description,
                attachment: command.attachment.trim().to_string(),
                is_popular: command.is_popular,
            })
            .await?;

        counter!(METRIC_BLOG_CREATED_TOTAL).increment(1);
        info!(
            target = "folio::admin::blogs",
            actor = %claims.email,
            blog = %blog.slug,
            "created blog"
        );

        let mut links = Vec::new();
        for slug in distinct_slugs(&command.categories) {
            let category = match self.categories.find_by_slug(&slug).await {
                Ok(Some(category)) => category,
                Ok(None) => {
                    return Err(AdminBlogError::CategoryNotFound {
                        slug,
                        blog_slug: blog.slug,
                    });
                }
                Err(source) => {
                    return Err(AdminBlogError::Link {
                        blog_slug: blog.slug,
                        source,
                    });
                }
            };

            if let Err(source) = self
                .details
                .create_detail(CreateCategoryDetailParams {
                    blog_id: blog.id,
                    category_id: category.id,
                })
                .await
            {
                return Err(AdminBlogError::Link {
                    blog_slug: blog.slug,
                    source,
                });
            }

            links.push(LinkOutcome::succeeded(category.id, Some(category.slug)));
        }

        Ok(CreateOutcome { blog, links })
    }

    /// Apply the edited fields and replace the blog's category links.
    ///
    /// Unknown categories abort before anything is written. After that,
    /// failed link removals and creations are collected in the report and the
    /// update still completes.
    pub async fn update_blog(
        &self,
        claims: &AdminClaims,
        command: UpdateBlogCommand,
    ) -> Result<UpdateOutcome, AdminBlogError> {
        let current = self.require_blog(&command.slug).await?;
        ensure_non_empty(&command.title, "title")?;

        let params = build_update_params(&current, &command);

        let selection = distinct_slugs(command.categories.as_deref().unwrap_or_default());
        let mut targets: Vec<CategoryRecord> = Vec::with_capacity(selection.len());
        for slug in selection {
            match self.categories.find_by_slug(&slug).await? {
                Some(category) => targets.push(category),
                None => {
                    return Err(AdminBlogError::CategoryNotFound {
                        slug,
                        blog_slug: current.slug,
                    });
                }
            }
        }

        let existing = self.details.list_for_blog(current.id).await?;
        let known_slugs: HashMap<Uuid, String> = self
            .categories
            .list_for_blogs(&[current.id])
            .await?
            .into_iter()
            .map(|(_, category)| (category.id, category.slug))
            .collect();

        let mut report = ReconcileReport::default();

        for detail in existing {
            let category_slug = known_slugs.get(&detail.category_id).cloned();
            let outcome = match self.details.remove_detail(detail.id).await {
                Ok(()) => LinkOutcome::succeeded(detail.category_id, category_slug),
                Err(err) => LinkOutcome::failed(detail.category_id, category_slug, &err),
            };
            report.removed.push(outcome);
        }

        let blog = self.writer.update_blog(params).await?;

        for category in targets {
            let outcome = match self
                .details
                .create_detail(CreateCategoryDetailParams {
                    blog_id: blog.id,
                    category_id: category.id,
                })
                .await
            {
                Ok(_) => LinkOutcome::succeeded(category.id, Some(category.slug)),
                Err(err) => LinkOutcome::failed(category.id, Some(category.slug), &err),
            };
            report.created.push(outcome);
        }

        log_reconcile_report(claims, &blog, &report);

        Ok(UpdateOutcome { blog, report })
    }
}

fn build_update_params(current: &BlogRecord, command: &UpdateBlogCommand) -> UpdateBlogParams {
    let attachment = command.attachment.trim();
    let attachment = if attachment.is_empty() {
        current.attachment.clone()
    } else {
        attachment.to_string()
    };

    UpdateBlogParams {
        id: current.id,
        title: command.title.trim().to_string(),
        subtitle: command.subtitle.clone(),
        description: command.description.clone(),
        attachment,
        is_popular: command.is_popular,
    }
}

fn log_reconcile_report(claims: &AdminClaims, blog: &BlogRecord, report: &ReconcileReport) {
    let failures: Vec<&LinkOutcome> = report.failures().collect();
    if failures.is_empty() {
        info!(
            target = "folio::admin::blogs",
            actor = %claims.email,
            blog = %blog.slug,
            removed = report.removed.len(),
            created = report.created.len(),
            "updated blog"
        );
        return;
    }

    counter!(METRIC_CATEGORY_LINK_FAILURES_TOTAL).increment(failures.len() as u64);
    warn!(
        target = "folio::admin::blogs",
        actor = %claims.email,
        blog = %blog.slug,
        failed = failures.len(),
        failures = ?failures,
        "updated blog with category link failures"
    );
}
