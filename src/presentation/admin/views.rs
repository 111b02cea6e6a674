use askama::Template;
use time::{OffsetDateTime, macros::format_description};

use crate::domain::entities::AdminClaims;

#[derive(Clone)]
pub struct AdminChrome {
    pub title: String,
    pub admin_name: String,
    pub admin_email: String,
}

impl AdminChrome {
    pub fn new(title: impl Into<String>, claims: &AdminClaims) -> Self {
        Self {
            title: title.into(),
            admin_name: claims.name.clone(),
            admin_email: claims.email.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct AdminBlogRowView {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub is_popular: bool,
    pub categories: Vec<String>,
    pub created_at: String,
    pub edit_href: String,
}

#[derive(Clone)]
pub struct AdminBlogListView {
    pub heading: String,
    pub rows: Vec<AdminBlogRowView>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub order_by: String,
    pub category_slug: String,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub new_blog_href: String,
}

impl AdminBlogListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn display_page(&self) -> u32 {
        self.page + 1
    }
}

#[derive(Template)]
#[template(path = "admin/index.html")]
pub struct AdminBlogsTemplate {
    pub view: AdminLayout<AdminBlogListView>,
}

#[derive(Clone)]
pub struct AdminCategoryOptionView {
    pub slug: String,
    pub name: String,
    pub selected: bool,
}

/// Shared by the create and edit forms; `category_field` names the repeated
/// form key each one submits.
#[derive(Clone)]
pub struct AdminBlogFormView {
    pub heading: String,
    pub form_action: String,
    pub submit_label: String,
    pub slug: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub attachment: String,
    pub is_popular: bool,
    pub category_field: String,
    pub options: Vec<AdminCategoryOptionView>,
    pub current_categories: Vec<String>,
}

impl AdminBlogFormView {
    pub fn has_attachment(&self) -> bool {
        !self.attachment.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/insert.html")]
pub struct AdminBlogCreateTemplate {
    pub view: AdminLayout<AdminBlogFormView>,
}

#[derive(Template)]
#[template(path = "admin/edit.html")]
pub struct AdminBlogEditTemplate {
    pub view: AdminLayout<AdminBlogFormView>,
}
