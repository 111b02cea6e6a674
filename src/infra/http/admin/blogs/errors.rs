use crate::application::{
    admin::blogs::AdminBlogError,
    error::{ErrorKind, ErrorPage},
};

pub(super) fn admin_blog_error(source: &'static str, err: AdminBlogError) -> ErrorPage {
    let page = match &err {
        AdminBlogError::ConstraintViolation(field) => ErrorPage::new(
            source,
            ErrorKind::BadRequest,
            "Invalid Blog Form",
            format!("The Field `{field}` Is Missing Or Invalid"),
        ),
        AdminBlogError::BlogNotFound { .. } => ErrorPage::new(
            source,
            ErrorKind::BadRequest,
            "Invalid Blog Slug",
            "Cannot Find Any Blog With The Given Slug",
        ),
        AdminBlogError::CategoryNotFound { slug, .. } => ErrorPage::new(
            source,
            ErrorKind::UnknownServerError,
            "Category Not Found",
            format!("Cannot Find Any Category With Slug = {slug}"),
        ),
        AdminBlogError::Link { .. } | AdminBlogError::Repo(_) => ErrorPage::new(
            source,
            ErrorKind::UnknownServerError,
            "Unknown Server Error",
            "The Request Failed Due To Unknown Server Error",
        ),
    };
    page.with_cause(&err)
}
