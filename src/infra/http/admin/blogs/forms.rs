use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminBlogListQuery {
    pub(super) page: Option<String>,
    pub(super) size: Option<String>,
    #[serde(rename = "orderBy")]
    pub(super) order_by: Option<String>,
    pub(super) slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminBlogCreateForm {
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) subtitle: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) attachment: String,
    #[serde(default)]
    pub(super) is_popular: Option<String>,
    #[serde(default)]
    pub(super) categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminBlogUpdateForm {
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) subtitle: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) attachment: String,
    #[serde(default)]
    pub(super) is_popular: Option<String>,
    #[serde(default)]
    pub(super) cates: Vec<String>,
}
