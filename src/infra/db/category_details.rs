use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{CategoryDetailsRepo, CreateCategoryDetailParams, RepoError},
    domain::entities::CategoryDetailRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryDetailRow {
    id: Uuid,
    blog_id: Uuid,
    category_id: Uuid,
}

impl From<CategoryDetailRow> for CategoryDetailRecord {
    fn from(row: CategoryDetailRow) -> Self {
        Self {
            id: row.id,
            blog_id: row.blog_id,
            category_id: row.category_id,
        }
    }
}

#[async_trait]
impl CategoryDetailsRepo for PostgresRepositories {
    async fn list_for_blog(&self, blog_id: Uuid) -> Result<Vec<CategoryDetailRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryDetailRow>(
            r#"
            SELECT id, blog_id, category_id
            FROM category_details
            WHERE blog_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(blog_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryDetailRecord::from).collect())
    }

    async fn create_detail(
        &self,
        params: CreateCategoryDetailParams,
    ) -> Result<CategoryDetailRecord, RepoError> {
        let row = sqlx::query_as::<_, CategoryDetailRow>(
            r#"
            INSERT INTO category_details (id, blog_id, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, blog_id, category_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(params.blog_id)
        .bind(params.category_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(CategoryDetailRecord::from(row))
    }

    async fn remove_detail(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM category_details WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
