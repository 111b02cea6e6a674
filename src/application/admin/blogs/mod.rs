//! Blog administration: listing, the create saga and category reconciliation.

mod commands;
mod queries;
mod service;
pub mod types;


pub use service::*;
pub use types::{
    AdminBlogError, BlogEditor, BlogListQuery, BlogListing, CategoryOption, CreateBlogCommand,
    CreateOutcome, LinkOutcome, METRIC_BLOG_CREATED_TOTAL, METRIC_CATEGORY_LINK_FAILURES_TOTAL,
    ReconcileReport, UpdateBlogCommand, UpdateOutcome, ensure_non_empty,
};
