use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::pagination::PageRequest,
    application::repos::{
        BlogQueryFilter, BlogsRepo, BlogsWriteRepo, CreateBlogParams, RepoError, UpdateBlogParams,
    },
    domain::{entities::BlogRecord, types::SortOrder},
};

use super::{PostgresRepositories, map_sqlx_error};

const BLOG_COLUMNS: &str = "b.id, b.slug, b.title, b.subtitle, b.description, b.attachment, \
    b.is_popular, b.created_at, b.updated_at";

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    slug: String,
    title: String,
    subtitle: String,
    description: String,
    attachment: String,
    is_popular: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BlogRow> for BlogRecord {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            attachment: row.attachment,
            is_popular: row.is_popular,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl PostgresRepositories {
    fn apply_blog_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, filter: &'q BlogQueryFilter) {
        if let Some(slug) = filter.category_slug.as_ref() {
            qb.push(
                " AND EXISTS (SELECT 1 FROM category_details cd \
                 INNER JOIN categories c ON c.id = cd.category_id \
                 WHERE cd.blog_id = b.id AND c.slug = ",
            );
            qb.push_bind(slug);
            qb.push(")");
        }
    }
}

#[async_trait]
impl BlogsRepo for PostgresRepositories {
    async fn list_blogs(
        &self,
        filter: &BlogQueryFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<Vec<BlogRecord>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(BLOG_COLUMNS);
        qb.push(" FROM blogs b WHERE 1=1");
        Self::apply_blog_filter(&mut qb, filter);

        let direction = order.as_sql();
        qb.push(format!(
            " ORDER BY b.created_at {direction}, b.id {direction} LIMIT "
        ));
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let rows = qb
            .build_query_as::<BlogRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlogRecord::from).collect())
    }

    async fn count_blogs(&self, filter: &BlogQueryFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blogs b WHERE 1=1");
        Self::apply_blog_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, slug, title, subtitle, description, attachment, is_popular,
                   created_at, updated_at
            FROM blogs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BlogRecord::from))
    }
}

#[async_trait]
impl BlogsWriteRepo for PostgresRepositories {
    async fn create_blog(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (id, slug, title, subtitle, description, attachment, is_popular)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, slug, title, subtitle, description, attachment, is_popular,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(params.slug)
        .bind(params.title)
        .bind(params.subtitle)
        .bind(params.description)
        .bind(params.attachment)
        .bind(params.is_popular)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(BlogRecord::from(row))
    }

    async fn update_blog(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = $2,
                subtitle = $3,
                description = $4,
                attachment = $5,
                is_popular = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING id, slug, title, subtitle, description, attachment, is_popular,
                      created_at, updated_at
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.subtitle)
        .bind(params.description)
        .bind(params.attachment)
        .bind(params.is_popular)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(BlogRecord::from(row))
    }
}
