use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{CategoriesRepo, RepoError},
    domain::entities::CategoryRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    slug: String,
    name: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BlogCategoryRow {
    blog_id: Uuid,
    #[sqlx(flatten)]
    category: CategoryRow,
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, slug, name
            FROM categories
            ORDER BY LOWER(name), slug
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, slug, name
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CategoryRecord::from))
    }

    async fn list_for_blogs(
        &self,
        blog_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, CategoryRecord)>, RepoError> {
        if blog_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, BlogCategoryRow>(
            r#"
            SELECT cd.blog_id, c.id, c.slug, c.name
            FROM category_details cd
            INNER JOIN categories c ON c.id = cd.category_id
            WHERE cd.blog_id = ANY($1)
            ORDER BY cd.blog_id, LOWER(c.name), c.slug
            "#,
        )
        .bind(blog_ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.blog_id, CategoryRecord::from(row.category)))
            .collect())
    }
}
