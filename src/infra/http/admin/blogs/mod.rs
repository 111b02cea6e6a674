mod editor;
mod errors;
mod forms;
mod handlers;
mod panel;

pub(super) use handlers::{
    admin_blog_create, admin_blog_edit, admin_blog_new, admin_blog_update, admin_blogs,
};
