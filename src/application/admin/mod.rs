//! Application services for the administrative surface.

pub mod blogs;

pub use blogs::AdminBlogService;
