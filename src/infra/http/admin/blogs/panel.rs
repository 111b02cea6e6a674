use crate::application::admin::blogs::BlogListing;
use crate::domain::entities::BlogWithCategories;
use crate::presentation::admin::views::{self as admin_views, format_timestamp};

pub(super) fn build_blog_list_view(listing: &BlogListing) -> admin_views::AdminBlogListView {
    let page = &listing.blogs;
    let order_by = listing.order.as_str();
    let category_slug = listing.category_slug.clone().unwrap_or_default();

    let href_for = |target: u32| list_href(target, page.size, order_by, &category_slug);

    admin_views::AdminBlogListView {
        heading: "Blogs".to_string(),
        rows: page.items.iter().map(build_row).collect(),
        page: page.page,
        size: page.size,
        total_pages: page.total_pages,
        total_items: page.total_items,
        order_by: order_by.to_string(),
        previous_href: page.has_previous().then(|| href_for(page.page - 1)),
        next_href: page.has_next().then(|| href_for(page.page + 1)),
        category_slug,
        new_blog_href: "/admin/insert".to_string(),
    }
}

fn build_row(entry: &BlogWithCategories) -> admin_views::AdminBlogRowView {
    let blog = &entry.blog;
    admin_views::AdminBlogRowView {
        slug: blog.slug.clone(),
        title: blog.title.clone(),
        subtitle: blog.subtitle.clone(),
        is_popular: blog.is_popular,
        categories: entry
            .categories
            .iter()
            .map(|category| category.name.clone())
            .collect(),
        created_at: format_timestamp(blog.created_at),
        edit_href: format!("/admin/edit/{}", blog.slug),
    }
}

fn list_href(page: u32, size: u32, order_by: &str, category_slug: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string())
        .append_pair("orderBy", order_by);
    if !category_slug.is_empty() {
        query.append_pair("slug", category_slug);
    }
    format!("/admin/index?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_href_keeps_filter_and_order() {
        assert_eq!(
            list_href(2, 5, "desc", "rust lang"),
            "/admin/index?page=2&size=5&orderBy=desc&slug=rust+lang"
        );
        assert_eq!(
            list_href(0, 3, "asc", ""),
            "/admin/index?page=0&size=3&orderBy=asc"
        );
    }
}
