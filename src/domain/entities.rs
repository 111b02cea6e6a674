//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub attachment: String,
    pub is_popular: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// One blog-category link. The many-to-many relation between blogs and
/// categories is realised through these rows only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDetailRecord {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub category_id: Uuid,
}

/// A blog together with the categories derived from its association rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogWithCategories {
    pub blog: BlogRecord,
    pub categories: Vec<CategoryRecord>,
}

impl BlogWithCategories {
    pub fn category_slugs(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.slug.as_str())
            .collect()
    }
}

/// Identity of the authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminClaims {
    pub subject: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccountRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminTokenRecord {
    pub id: Uuid,
    pub admin_id: Option<Uuid>,
    pub prefix: String,
    pub hashed_secret: Vec<u8>,
    pub revoked_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl From<AdminAccountRecord> for AdminClaims {
    fn from(account: AdminAccountRecord) -> Self {
        Self {
            subject: account.id,
            email: account.email,
            name: account.name,
        }
    }
}
