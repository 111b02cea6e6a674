//! Application services layer.

pub mod admin;
pub mod claims;
pub mod error;
pub mod pagination;
pub mod repos;
