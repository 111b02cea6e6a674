use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{
        AdminAccountsRepo, CreateAdminAccountParams, CreateAdminTokenParams, RepoError,
    },
    domain::entities::{AdminAccountRecord, AdminTokenRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AdminAccountRow {
    id: Uuid,
    email: String,
    name: String,
    created_at: OffsetDateTime,
}

impl From<AdminAccountRow> for AdminAccountRecord {
    fn from(row: AdminAccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdminTokenRow {
    id: Uuid,
    admin_id: Option<Uuid>,
    prefix: String,
    hashed_secret: Vec<u8>,
    revoked_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
}

impl From<AdminTokenRow> for AdminTokenRecord {
    fn from(row: AdminTokenRow) -> Self {
        Self {
            id: row.id,
            admin_id: row.admin_id,
            prefix: row.prefix,
            hashed_secret: row.hashed_secret,
            revoked_at: row.revoked_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AdminAccountsRepo for PostgresRepositories {
    async fn find_token_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Option<AdminTokenRecord>, RepoError> {
        let row = sqlx::query_as::<_, AdminTokenRow>(
            r#"
            SELECT id, admin_id, prefix, hashed_secret, revoked_at, created_at
            FROM admin_tokens
            WHERE prefix = $1
            "#,
        )
        .bind(prefix)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AdminTokenRecord::from))
    }

    async fn find_account(&self, id: Uuid) -> Result<Option<AdminAccountRecord>, RepoError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r#"
            SELECT id, email, name, created_at
            FROM admin_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AdminAccountRecord::from))
    }

    async fn create_account(
        &self,
        params: CreateAdminAccountParams,
    ) -> Result<AdminAccountRecord, RepoError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r#"
            INSERT INTO admin_accounts (id, email, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(params.email)
        .bind(params.name)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(AdminAccountRecord::from(row))
    }

    async fn create_token(
        &self,
        params: CreateAdminTokenParams,
    ) -> Result<AdminTokenRecord, RepoError> {
        let row = sqlx::query_as::<_, AdminTokenRow>(
            r#"
            INSERT INTO admin_tokens (id, admin_id, prefix, hashed_secret)
            VALUES ($1, $2, $3, $4)
            RETURNING id, admin_id, prefix, hashed_secret, revoked_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(params.admin_id)
        .bind(params.prefix)
        .bind(params.hashed_secret)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(AdminTokenRecord::from(row))
    }
}
