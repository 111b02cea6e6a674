use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use tracing::warn;

use crate::{
    application::{
        admin::blogs::{AdminBlogError, BlogListQuery, CreateBlogCommand, UpdateBlogCommand},
        pagination::PageRequest,
    },
    domain::types::SortOrder,
    infra::http::admin::{AdminIdentity, AdminState},
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{
    editor::{build_blog_edit_view, build_new_blog_view},
    errors::admin_blog_error,
    forms::{AdminBlogCreateForm, AdminBlogListQuery, AdminBlogUpdateForm},
    panel::build_blog_list_view,
};

fn parse_checkbox_flag(input: &Option<String>) -> bool {
    matches!(input.as_deref(), Some("on") | Some("true"))
}

/// Unparsable or negative numbers fall back to `default`.
fn parse_number(input: Option<&str>, default: u32) -> u32 {
    input
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}

fn build_list_query(query: &AdminBlogListQuery, default_size: u32) -> BlogListQuery {
    let page = parse_number(query.page.as_deref(), 0);
    let size = parse_number(query.size.as_deref(), default_size);
    BlogListQuery {
        page: PageRequest::new(page, size),
        order: SortOrder::parse_lenient(query.order_by.as_deref()),
        category_slug: query.slug.clone(),
    }
}

pub(crate) async fn admin_blogs(
    State(state): State<AdminState>,
    AdminIdentity(claims): AdminIdentity,
    Query(query): Query<AdminBlogListQuery>,
) -> Response {
    let query = build_list_query(&query, state.default_page_size.get());

    let listing = match state.blogs.list_blogs(&claims, query).await {
        Ok(listing) => listing,
        Err(err) => return admin_blog_error("infra::http::admin_blogs", err).into_response(),
    };

    let content = build_blog_list_view(&listing);
    let chrome = admin_views::AdminChrome::new("Blogs", &claims);
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminBlogsTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_blog_new(
    State(state): State<AdminState>,
    AdminIdentity(claims): AdminIdentity,
) -> Response {
    let categories = match state.blogs.load_create_form(&claims).await {
        Ok(categories) => categories,
        Err(err) => return admin_blog_error("infra::http::admin_blog_new", err).into_response(),
    };

    let content = build_new_blog_view(&categories);
    let chrome = admin_views::AdminChrome::new("New Blog", &claims);
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminBlogCreateTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_blog_create(
    State(state): State<AdminState>,
    AdminIdentity(claims): AdminIdentity,
    Form(form): Form<AdminBlogCreateForm>,
) -> Response {
    let command = CreateBlogCommand {
        is_popular: parse_checkbox_flag(&form.is_popular),
        title: form.title,
        subtitle: form.subtitle,
        description: form.description,
        attachment: form.attachment,
        categories: form.categories,
    };

    match state.blogs.create_blog(&claims, command).await {
        Ok(outcome) => Redirect::to(&format!("/admin/edit/{}", outcome.blog.slug)).into_response(),
        Err(err) => {
            if let AdminBlogError::CategoryNotFound { blog_slug, .. }
            | AdminBlogError::Link { blog_slug, .. } = &err
            {
                warn!(
                    target = "folio::admin::blogs",
                    blog_slug = %blog_slug,
                    actor = %claims.email,
                    "blog created but category linking stopped; created blog kept"
                );
            }
            admin_blog_error("infra::http::admin_blog_create", err).into_response()
        }
    }
}

pub(crate) async fn admin_blog_edit(
    State(state): State<AdminState>,
    AdminIdentity(claims): AdminIdentity,
    Path(slug): Path<String>,
) -> Response {
    let editor = match state.blogs.load_edit_form(&claims, &slug).await {
        Ok(editor) => editor,
        Err(err) => return admin_blog_error("infra::http::admin_blog_edit", err).into_response(),
    };

    let content = build_blog_edit_view(&editor);
    let chrome = admin_views::AdminChrome::new("Edit Blog", &claims);
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminBlogEditTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_blog_update(
    State(state): State<AdminState>,
    AdminIdentity(claims): AdminIdentity,
    Path(slug): Path<String>,
    Form(form): Form<AdminBlogUpdateForm>,
) -> Response {
    let command = UpdateBlogCommand {
        slug,
        is_popular: parse_checkbox_flag(&form.is_popular),
        title: form.title,
        subtitle: form.subtitle,
        description: form.description,
        attachment: form.attachment,
        categories: (!form.cates.is_empty()).then_some(form.cates),
    };

    match state.blogs.update_blog(&claims, command).await {
        Ok(_) => Redirect::to("/admin/index").into_response(),
        Err(err) => admin_blog_error("infra::http::admin_blog_update", err).into_response(),
    }
}
